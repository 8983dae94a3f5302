// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. editor::EditorBuffer)
    clippy::module_name_repetitions
)]

//! # Splitmark
//!
//! A split-pane terminal markdown editor with live preview.
//!
//! Splitmark shows the markdown source on the left and a rendered preview on
//! the right:
//! - Formatting toolbar and Alt shortcuts for common markdown markup
//! - Snapshot-based undo/redo
//! - GitHub Flavored Markdown via comrak, as styled text or raw HTML
//! - Five editor colour themes and a light/dark/system page mode
//!
//! ## Architecture
//!
//! Splitmark uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`config`]: Themes, colour modes and the preference file
//! - [`document`]: Markdown parsing, derived counts and HTML
//! - [`editor`]: Text buffer, edit history and formatting actions
//! - [`ui`]: Terminal UI components

pub mod app;
pub mod config;
pub mod document;
pub mod editor;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::document::{DerivedView, Document};
    pub use crate::editor::{EditHistory, EditorBuffer, FormatAction};
    pub use crate::ui::viewport::Viewport;
}
