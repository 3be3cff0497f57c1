use serde::{Deserialize, Serialize};

/// The authenticated user's profile as returned by `GET /users/me`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
    #[serde(default)]
    pub status: Option<String>,
}

impl Identity {
    /// Status for display, defaulting when the server omits it
    pub fn status_display(&self) -> &str {
        self.status.as_deref().unwrap_or("user")
    }
}
