//! REST API client module for Active Tigger servers.
//!
//! This module provides the `ApiClient` for talking to the backend:
//! token-based login, identity lookup, and the project endpoints.
//!
//! Session-gated calls carry a JWT bearer token obtained from the `/token`
//! endpoint plus a `username` header, and fail with an explicit error when
//! no session is present.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
