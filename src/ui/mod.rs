//! Terminal UI module using ratatui.
//!
//! This module provides the TUI rendering and input handling:
//!
//! - `render`: Main frame rendering and layout
//! - `input`: Keyboard event handling
//! - `nav`: Session-gated navigation logic
//! - `styles`: Color schemes and text styling
//! - `tabs`: Tab-specific content rendering (home, projects, help)

pub mod input;
pub mod nav;
pub mod render;
pub mod styles;
pub mod tabs;
