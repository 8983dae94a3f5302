//! Colours for the editor themes, the page chrome and the preview.
//!
//! The editor pane is painted from the selected [`EditorTheme`]; everything
//! else follows the resolved light/dark [`Appearance`].

use ratatui::style::{Color, Modifier, Style};

use crate::config::{Appearance, EditorTheme};
use crate::document::{InlineStyle, LineType};

/// `0xRRGGBB` to a truecolor value.
#[allow(clippy::cast_possible_truncation)]
const fn hex(rgb: u32) -> Color {
    Color::Rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

/// Colours of the editor pane for one [`EditorTheme`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorPalette {
    pub bg: Color,
    pub fg: Color,
    /// Title and toolbar rows
    pub header_bg: Color,
    pub gutter_bg: Color,
    pub gutter_fg: Color,
    pub title: Color,
    pub button_bg: Color,
    pub button_fg: Color,
    pub selection_bg: Color,
    pub border: Color,
}

impl EditorPalette {
    pub const fn for_theme(theme: EditorTheme) -> Self {
        match theme {
            EditorTheme::GithubLight => Self {
                bg: hex(0xffffff),
                fg: hex(0x0f172a),
                header_bg: hex(0xf1f5f9),
                gutter_bg: hex(0xf8fafc),
                gutter_fg: hex(0x94a3b8),
                title: hex(0x64748b),
                button_bg: hex(0xffffff),
                button_fg: hex(0x1e293b),
                selection_bg: hex(0xbae6fd),
                border: hex(0xe2e8f0),
            },
            EditorTheme::GithubDark => Self {
                bg: hex(0x0f172a),
                fg: hex(0xf1f5f9),
                header_bg: hex(0x020617),
                gutter_bg: hex(0x020617),
                gutter_fg: hex(0x64748b),
                title: hex(0x94a3b8),
                button_bg: hex(0x1e293b),
                button_fg: hex(0xf1f5f9),
                selection_bg: hex(0x334155),
                border: hex(0x334155),
            },
            EditorTheme::Dracula => Self {
                bg: hex(0x282a36),
                fg: hex(0xf8f8f2),
                header_bg: hex(0x21222c),
                gutter_bg: hex(0x21222c),
                gutter_fg: hex(0x6272a4),
                title: hex(0xbd93f9),
                button_bg: hex(0x343746),
                button_fg: hex(0xf8f8f2),
                selection_bg: hex(0x44475a),
                border: hex(0x701a75),
            },
            EditorTheme::Monokai => Self {
                bg: hex(0x272822),
                fg: hex(0xf8f8f2),
                header_bg: hex(0x1f201c),
                gutter_bg: hex(0x1f201c),
                gutter_fg: hex(0x75715e),
                title: hex(0xa6e22e),
                button_bg: hex(0x3e3d32),
                button_fg: hex(0xf8f8f2),
                selection_bg: hex(0x49483e),
                border: hex(0x3f3f46),
            },
            EditorTheme::SolarizedDark => Self {
                bg: hex(0x002b36),
                fg: hex(0x93a1a1),
                header_bg: hex(0x001f27),
                gutter_bg: hex(0x001f27),
                gutter_fg: hex(0x586e75),
                title: hex(0x2aa198),
                button_bg: hex(0x073642),
                button_fg: hex(0x93a1a1),
                selection_bg: hex(0x073642),
                border: hex(0x164e63),
            },
        }
    }

    /// Style of the character under the cursor.
    pub fn cursor(&self) -> Style {
        Style::default().bg(self.fg).fg(self.bg)
    }

    pub fn text(&self) -> Style {
        Style::default().bg(self.bg).fg(self.fg)
    }

    pub fn selected(&self) -> Style {
        self.text().bg(self.selection_bg)
    }
}

/// Colours of the header, preview pane and status row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChromePalette {
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub badge_bg: Color,
    pub divider: Color,
    pub status_bg: Color,
    pub status_fg: Color,
}

impl ChromePalette {
    pub const fn for_appearance(appearance: Appearance) -> Self {
        match appearance {
            Appearance::Light => Self {
                bg: Color::Rgb(249, 248, 243),
                fg: hex(0x0f172a),
                muted: hex(0x64748b),
                badge_bg: hex(0xe2e8f0),
                divider: hex(0xcbd5e1),
                status_bg: Color::Indexed(252),
                status_fg: Color::Indexed(235),
            },
            Appearance::Dark => Self {
                bg: Color::Rgb(24, 26, 30),
                fg: hex(0xe2e8f0),
                muted: hex(0x94a3b8),
                badge_bg: hex(0x334155),
                divider: hex(0x334155),
                status_bg: Color::Indexed(236),
                status_fg: Color::Indexed(252),
            },
        }
    }

    pub fn base(&self) -> Style {
        Style::default().bg(self.bg).fg(self.fg)
    }
}

/// Get the style for a rendered preview line.
pub fn style_for_line_type(line_type: &LineType, appearance: Appearance) -> Style {
    let light_bg = appearance.is_light();
    match line_type {
        // Headings - bold with distinct colors per level
        LineType::Heading(1) => Style::default()
            .fg(if light_bg {
                Color::Indexed(24)
            } else {
                Color::Cyan
            })
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        LineType::Heading(2) => Style::default()
            .fg(if light_bg {
                Color::Indexed(22)
            } else {
                Color::Green
            })
            .add_modifier(Modifier::BOLD),
        LineType::Heading(3) => Style::default()
            .fg(if light_bg {
                Color::Indexed(58)
            } else {
                Color::Yellow
            })
            .add_modifier(Modifier::BOLD),
        LineType::Heading(4) => Style::default()
            .fg(if light_bg {
                Color::Indexed(24)
            } else {
                Color::Blue
            })
            .add_modifier(Modifier::BOLD),
        LineType::Heading(5) => Style::default()
            .fg(if light_bg {
                Color::Indexed(54)
            } else {
                Color::Magenta
            })
            .add_modifier(Modifier::BOLD),
        LineType::Heading(_) => Style::default()
            .fg(if light_bg {
                Color::Indexed(24)
            } else {
                Color::Cyan
            })
            .add_modifier(Modifier::BOLD),

        LineType::CodeBlock => Style::default().fg(if light_bg {
            Color::Indexed(238)
        } else {
            Color::Indexed(245)
        }),

        LineType::BlockQuote => Style::default()
            .fg(if light_bg {
                Color::Indexed(24)
            } else {
                Color::Blue
            })
            .add_modifier(Modifier::ITALIC),

        LineType::HorizontalRule => Style::default()
            .fg(if light_bg {
                Color::Indexed(245)
            } else {
                Color::Indexed(240)
            })
            .add_modifier(Modifier::DIM),

        LineType::Table => Style::default().fg(if light_bg {
            Color::Indexed(236)
        } else {
            Color::Indexed(250)
        }),

        LineType::Image => Style::default()
            .fg(if light_bg {
                Color::Indexed(90)
            } else {
                Color::Magenta
            })
            .add_modifier(Modifier::ITALIC),

        LineType::ListItem(_) | LineType::Paragraph | LineType::Empty => Style::default(),
    }
}

/// Get the style for an inline span, merged with a base line style.
pub fn style_for_inline(base: Style, inline: InlineStyle, appearance: Appearance) -> Style {
    let light_bg = appearance.is_light();
    let mut style = base;

    if inline.emphasis {
        style = style.add_modifier(Modifier::ITALIC);
    }
    if inline.strong {
        style = style.add_modifier(Modifier::BOLD);
    }
    if inline.strikethrough {
        style = style.add_modifier(Modifier::CROSSED_OUT);
    }
    if inline.link {
        style = style.add_modifier(Modifier::UNDERLINED).fg(if light_bg {
            Color::Blue
        } else {
            Color::LightBlue
        });
    }
    if inline.code {
        style = style
            .fg(if light_bg {
                Color::Indexed(88)
            } else {
                Color::Red
            })
            .add_modifier(Modifier::BOLD);
    }

    style
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_styles_are_bold() {
        for appearance in [Appearance::Light, Appearance::Dark] {
            for level in 1..=6 {
                let style = style_for_line_type(&LineType::Heading(level), appearance);
                assert!(style.add_modifier.contains(Modifier::BOLD));
            }
        }
    }

    #[test]
    fn test_h1_is_underlined() {
        let style = style_for_line_type(&LineType::Heading(1), Appearance::Dark);
        assert!(style.add_modifier.contains(Modifier::UNDERLINED));
    }

    #[test]
    fn test_light_and_dark_code_blocks_differ() {
        let light = style_for_line_type(&LineType::CodeBlock, Appearance::Light);
        let dark = style_for_line_type(&LineType::CodeBlock, Appearance::Dark);
        assert_ne!(light.fg, dark.fg);
    }

    #[test]
    fn test_inline_link_is_underlined_and_coloured() {
        let inline = InlineStyle {
            link: true,
            ..InlineStyle::default()
        };
        let style = style_for_inline(Style::default(), inline, Appearance::Dark);
        assert!(style.add_modifier.contains(Modifier::UNDERLINED));
        assert_eq!(style.fg, Some(Color::LightBlue));
    }

    #[test]
    fn test_inline_flags_stack() {
        let inline = InlineStyle {
            emphasis: true,
            strong: true,
            strikethrough: true,
            ..InlineStyle::default()
        };
        let style = style_for_inline(Style::default(), inline, Appearance::Light);
        assert!(style.add_modifier.contains(Modifier::ITALIC));
        assert!(style.add_modifier.contains(Modifier::BOLD));
        assert!(style.add_modifier.contains(Modifier::CROSSED_OUT));
    }

    #[test]
    fn test_hex_splits_channels() {
        assert_eq!(hex(0x0f172a), Color::Rgb(0x0f, 0x17, 0x2a));
    }

    #[test]
    fn test_every_theme_has_distinct_text_and_background() {
        for theme in EditorTheme::ALL {
            let palette = EditorPalette::for_theme(theme);
            assert_ne!(palette.bg, palette.fg, "{}", theme.id());
            assert_ne!(palette.selection_bg, palette.bg, "{}", theme.id());
        }
    }

    #[test]
    fn test_cursor_inverts_text() {
        let palette = EditorPalette::for_theme(EditorTheme::Dracula);
        assert_eq!(palette.cursor().bg, palette.text().fg);
        assert_eq!(palette.cursor().fg, palette.text().bg);
    }
}
