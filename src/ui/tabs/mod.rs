//! Tab-specific content rendering.

pub mod help;
pub mod home;
pub mod projects;
