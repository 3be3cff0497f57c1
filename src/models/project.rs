// Allow dead code: API response structs have fields for completeness
#![allow(dead_code)]

use serde::{Deserialize, Serialize};

use crate::utils::format_date;

/// Parameters of an existing project, as stored server-side.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProjectParams {
    pub project_name: String,
    pub project_slug: Option<String>,
    pub filename: Option<String>,
    pub col_text: Option<String>,
    pub col_id: Option<String>,
    pub n_train: Option<i64>,
    pub n_test: Option<i64>,
    pub language: Option<String>,
    pub cols_context: Vec<String>,
}

impl ProjectParams {
    /// Slug if the server assigned one, otherwise the raw name
    pub fn slug(&self) -> &str {
        self.project_slug.as_deref().unwrap_or(&self.project_name)
    }

    pub fn display_sizes(&self) -> String {
        match (self.n_train, self.n_test) {
            (Some(train), Some(test)) if test > 0 => format!("{} train / {} test", train, test),
            (Some(train), _) => format!("{} train", train),
            _ => "Unknown".to_string(),
        }
    }
}

/// One entry of the `GET /projects` listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub parameters: ProjectParams,
    #[serde(default)]
    pub user_right: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl ProjectSummary {
    pub fn name(&self) -> &str {
        &self.parameters.project_name
    }

    pub fn created_display(&self) -> String {
        match (&self.created_by, &self.created_at) {
            (Some(by), Some(at)) => format!("{} ({})", by, format_date(at)),
            (Some(by), None) => by.clone(),
            (None, Some(at)) => format_date(at),
            (None, None) => "Unknown".to_string(),
        }
    }
}

/// Response envelope for `GET /projects`
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProjectsResponse {
    #[serde(default)]
    pub projects: Vec<ProjectSummary>,
}

/// Descriptor for creating a new project via `POST /projects/new`.
///
/// The `csv` field carries the raw dataset; everything else tells the server
/// how to read it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectData {
    pub project_name: String,
    pub filename: String,
    pub col_text: String,
    pub col_id: String,
    pub n_train: i64,
    pub n_test: i64,
    #[serde(default = "default_language")]
    pub language: String,
    pub csv: String,
}

fn default_language() -> String {
    "fr".to_string()
}

/// Live state of a project from `GET /state/{project_name}`.
///
/// Only `params` has a stable shape; the remaining sections are kept as raw
/// JSON maps and summarized by key count for display.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProjectState {
    #[serde(default)]
    pub params: ProjectParams,
    #[serde(default)]
    pub schemes: serde_json::Value,
    #[serde(default)]
    pub features: serde_json::Value,
    #[serde(default)]
    pub simplemodel: serde_json::Value,
    #[serde(default)]
    pub bertmodels: serde_json::Value,
}

impl ProjectState {
    /// Names under `schemes.available`, empty when absent
    pub fn scheme_names(&self) -> Vec<String> {
        Self::object_keys(&self.schemes["available"])
    }

    /// Names under `features.available`, empty when absent
    pub fn feature_names(&self) -> Vec<String> {
        match &self.features["available"] {
            serde_json::Value::Array(items) => items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            other => Self::object_keys(other),
        }
    }

    fn object_keys(value: &serde_json::Value) -> Vec<String> {
        match value {
            serde_json::Value::Object(map) => map.keys().cloned().collect(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_projects_response() {
        let json = r#"{
            "projects": [{
                "parameters": {
                    "project_name": "press-articles",
                    "project_slug": "press-articles",
                    "n_train": 1200,
                    "n_test": 300,
                    "language": "fr"
                },
                "user_right": "manager",
                "created_by": "alice",
                "created_at": "2024-03-01T10:00:00Z"
            }]
        }"#;

        let resp: ProjectsResponse = serde_json::from_str(json).expect("Failed to parse projects");
        assert_eq!(resp.projects.len(), 1);

        let p = &resp.projects[0];
        assert_eq!(p.name(), "press-articles");
        assert_eq!(p.parameters.display_sizes(), "1200 train / 300 test");
        assert_eq!(p.created_display(), "alice (Mar 01, 2024)");
    }

    #[test]
    fn test_parse_projects_response_empty() {
        let resp: ProjectsResponse = serde_json::from_str("{}").expect("Failed to parse empty");
        assert!(resp.projects.is_empty());
    }

    #[test]
    fn test_project_state_sections() {
        let json = r#"{
            "params": {"project_name": "demo"},
            "schemes": {"available": {"default": ["positive", "negative"]}},
            "features": {"available": ["sbert", "fasttext"]}
        }"#;

        let state: ProjectState = serde_json::from_str(json).expect("Failed to parse state");
        assert_eq!(state.params.project_name, "demo");
        assert_eq!(state.scheme_names(), vec!["default".to_string()]);
        let mut features = state.feature_names();
        features.sort();
        assert_eq!(features, vec!["fasttext".to_string(), "sbert".to_string()]);
    }

    #[test]
    fn test_project_data_round_trip_defaults_language() {
        let json = r#"{
            "project_name": "demo",
            "filename": "data.csv",
            "col_text": "text",
            "col_id": "id",
            "n_train": 100,
            "n_test": 0,
            "csv": "id,text\n1,hello"
        }"#;
        let data: ProjectData = serde_json::from_str(json).expect("Failed to parse descriptor");
        assert_eq!(data.language, "fr");
    }

    #[test]
    fn test_params_slug_falls_back_to_name() {
        let params = ProjectParams {
            project_name: "My Project".to_string(),
            ..Default::default()
        };
        assert_eq!(params.slug(), "My Project");
    }
}
