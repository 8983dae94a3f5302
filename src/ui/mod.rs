//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`layout`]: Split ratio and the screen regions derived from it
//! - [`viewport`]: Scroll position and visible range management
//! - [`style`]: Editor palettes and preview colors

pub mod layout;
pub mod style;
pub mod viewport;

mod overlays;
mod render;
mod status;
mod toolbar;

pub use overlays::help_lines;
pub use render::{APP_TITLE, SPLIT_BADGE, render};
pub use toolbar::{button_at, toolbar_buttons};

/// Blank columns to the left of the preview text.
pub const DOCUMENT_LEFT_PADDING: u16 = 2;

#[cfg(test)]
mod tests;
