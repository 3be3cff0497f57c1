//! Data models for Active Tigger entities.
//!
//! This module contains the data structures exchanged with the server:
//!
//! - `Identity`: the authenticated user's profile
//! - `ProjectSummary`, `ProjectParams`: existing projects and their parameters
//! - `ProjectData`: descriptor for creating a new project
//! - `ProjectState`: live state of a single project

pub mod project;
pub mod user;

pub use project::{ProjectData, ProjectParams, ProjectState, ProjectSummary, ProjectsResponse};
pub use user::Identity;
