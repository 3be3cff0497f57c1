//! Authentication module for managing the user session.
//!
//! This module provides `Session`, the single holder of the authenticated
//! identity and bearer token. Sessions are persisted to disk and expire
//! 60 minutes after the token was issued. Credentials themselves are never
//! persisted anywhere.

pub mod session;

pub use session::{Session, SessionData};
