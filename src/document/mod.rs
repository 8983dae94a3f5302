//! Markdown document parsing and rendering.
//!
//! This module handles:
//! - Counting lines and words and rendering HTML for the preview
//! - Laying out the comrak tree as styled terminal lines

mod derived;
mod parser;
mod types;

use comrak::Options;

pub use derived::{DerivedView, line_count, render_html, word_count};
pub use parser::parse;
pub use types::{Document, InlineSpan, InlineStyle, LineType, RenderedLine};

/// Turn on the GitHub Flavored Markdown extensions used everywhere.
fn enable_gfm(options: &mut Options) {
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
}
