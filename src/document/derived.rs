//! Values computed from the document text after every change.

use comrak::{Options, markdown_to_html};

/// Line count, word count and rendered HTML for one version of the text.
///
/// Always recomputed from scratch; never mutates the text it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivedView {
    pub line_count: usize,
    pub word_count: usize,
    pub html: String,
}

impl DerivedView {
    pub fn compute(text: &str) -> Self {
        Self {
            line_count: line_count(text),
            word_count: word_count(text),
            html: render_html(text),
        }
    }
}

/// Number of `\n`-delimited segments. Empty text is one line.
pub fn line_count(text: &str) -> usize {
    text.split('\n').count()
}

/// Number of whitespace-delimited tokens.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Render markdown to an HTML fragment with the GFM extensions enabled.
///
/// Raw HTML in the source is omitted from the output.
pub fn render_html(text: &str) -> String {
    let mut options = Options::default();
    super::enable_gfm(&mut options);
    markdown_to_html(text, &options)
}
