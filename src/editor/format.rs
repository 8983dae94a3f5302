use super::buffer::Selection;

/// Result of a formatting operation: the full new text plus the selection
/// that should be restored once the text has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub text: String,
    pub selection: Selection,
}

/// Wrap the selected text in `prefix`/`suffix`.
///
/// An empty selection inserts `placeholder` instead. The returned selection
/// spans exactly the wrapped content so it can be typed over immediately.
/// Offsets are in characters.
pub fn wrap_selection(
    text: &str,
    selection: Selection,
    prefix: &str,
    suffix: &str,
    placeholder: &str,
) -> Edit {
    let start = byte_offset(text, selection.start);
    let end = byte_offset(text, selection.end).max(start);
    let selected = &text[start..end];
    let content = if selected.is_empty() {
        placeholder
    } else {
        selected
    };

    let mut out = String::with_capacity(text.len() + prefix.len() + suffix.len() + content.len());
    out.push_str(&text[..start]);
    out.push_str(prefix);
    out.push_str(content);
    out.push_str(suffix);
    out.push_str(&text[end..]);

    let selection_start = selection.start + prefix.chars().count();
    let selection_end = selection_start + content.chars().count();
    Edit {
        text: out,
        selection: Selection::new(selection_start, selection_end),
    }
}

/// Insert `prefix` at the start of the line containing `cursor`.
///
/// The cursor keeps its place in the line, so it ends up shifted right by
/// the prefix length as a collapsed selection.
pub fn prefix_current_line(text: &str, cursor: usize, prefix: &str) -> Edit {
    let cursor_byte = byte_offset(text, cursor);
    let line_start = text[..cursor_byte].rfind('\n').map_or(0, |idx| idx + 1);

    let mut out = String::with_capacity(text.len() + prefix.len());
    out.push_str(&text[..line_start]);
    out.push_str(prefix);
    out.push_str(&text[line_start..]);

    let next_cursor = cursor.min(text.chars().count()) + prefix.chars().count();
    Edit {
        text: out,
        selection: Selection::collapsed(next_cursor),
    }
}

/// Convert a character offset into a byte offset, clamped to the text end.
fn byte_offset(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map_or(text.len(), |(idx, _)| idx)
}

/// How a toolbar action changes the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatShape {
    Wrap {
        prefix: &'static str,
        suffix: &'static str,
        placeholder: &'static str,
    },
    LinePrefix(&'static str),
}

/// Markdown formatting shortcuts offered by the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatAction {
    Bold,
    Italic,
    InlineCode,
    Link,
    Heading,
    Quote,
    BulletList,
    OrderedList,
}

impl FormatAction {
    /// Toolbar order.
    pub const ALL: [Self; 8] = [
        Self::Bold,
        Self::Italic,
        Self::InlineCode,
        Self::Link,
        Self::Heading,
        Self::Quote,
        Self::BulletList,
        Self::OrderedList,
    ];

    pub const fn shape(self) -> FormatShape {
        match self {
            Self::Bold => FormatShape::Wrap {
                prefix: "**",
                suffix: "**",
                placeholder: "bold text",
            },
            Self::Italic => FormatShape::Wrap {
                prefix: "*",
                suffix: "*",
                placeholder: "italic text",
            },
            Self::InlineCode => FormatShape::Wrap {
                prefix: "`",
                suffix: "`",
                placeholder: "code",
            },
            Self::Link => FormatShape::Wrap {
                prefix: "[",
                suffix: "](https://example.com)",
                placeholder: "link text",
            },
            Self::Heading => FormatShape::LinePrefix("## "),
            Self::Quote => FormatShape::LinePrefix("> "),
            Self::BulletList => FormatShape::LinePrefix("- "),
            Self::OrderedList => FormatShape::LinePrefix("1. "),
        }
    }

    /// Human-readable name, used for help text and toasts.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bold => "Bold",
            Self::Italic => "Italic",
            Self::InlineCode => "Inline code",
            Self::Link => "Link",
            Self::Heading => "Heading",
            Self::Quote => "Quote",
            Self::BulletList => "Bullet list",
            Self::OrderedList => "Ordered list",
        }
    }

    /// Compact glyph drawn on the toolbar button.
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Bold => "B",
            Self::Italic => "I",
            Self::InlineCode => "<>",
            Self::Link => "@",
            Self::Heading => "H2",
            Self::Quote => "\"",
            Self::BulletList => "•",
            Self::OrderedList => "1.",
        }
    }

    /// Alt+<key> shortcut.
    pub const fn shortcut(self) -> char {
        match self {
            Self::Bold => 'b',
            Self::Italic => 'i',
            Self::InlineCode => 'c',
            Self::Link => 'k',
            Self::Heading => 'h',
            Self::Quote => 'q',
            Self::BulletList => 'u',
            Self::OrderedList => 'o',
        }
    }

    pub fn from_shortcut(key: char) -> Option<Self> {
        let key = key.to_ascii_lowercase();
        Self::ALL.into_iter().find(|action| action.shortcut() == key)
    }

    /// Apply the action to `text` with the current `selection`.
    ///
    /// Line-prefix actions use the selection start as the cursor.
    pub fn apply(self, text: &str, selection: Selection) -> Edit {
        match self.shape() {
            FormatShape::Wrap {
                prefix,
                suffix,
                placeholder,
            } => wrap_selection(text, selection, prefix, suffix, placeholder),
            FormatShape::LinePrefix(prefix) => prefix_current_line(text, selection.start, prefix),
        }
    }
}
