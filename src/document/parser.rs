//! Terminal rendition of markdown, built from the comrak tree.

use comrak::nodes::{AstNode, ListDelimType, ListType, NodeValue, TableAlignment};
use comrak::{Arena, Options, parse_document};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::types::{Document, InlineSpan, InlineStyle, LineType, RenderedLine};

const CODE_RIGHT_PADDING: usize = 3;

impl Document {
    /// Parse markdown source and lay it out for a pane `width` columns wide.
    ///
    /// # Example
    ///
    /// ```
    /// use splitmark::document::Document;
    ///
    /// let doc = Document::parse("# Hello\n\nWorld", 40);
    /// assert!(doc.line_count() >= 3);
    /// ```
    pub fn parse(source: &str, width: u16) -> Self {
        parse(source, width)
    }
}

/// Parse markdown source into a Document wrapped to `width`.
pub fn parse(source: &str, width: u16) -> Document {
    let arena = Arena::new();
    let mut options = Options::default();
    super::enable_gfm(&mut options);
    let root = parse_document(&arena, source, &options);

    let mut renderer = Renderer::new(usize::from(width.max(1)));
    renderer.block(root, 0, None);

    // Drop the trailing separator so the preview does not end in blank rows.
    while renderer
        .lines
        .last()
        .is_some_and(|line| *line.line_type() == LineType::Empty)
    {
        renderer.lines.pop();
    }

    Document::from_parts(source.to_string(), width, renderer.lines)
}

struct Renderer {
    lines: Vec<RenderedLine>,
    width: usize,
}

impl Renderer {
    const fn new(width: usize) -> Self {
        Self {
            lines: Vec::new(),
            width,
        }
    }

    fn push(&mut self, content: String, line_type: LineType) {
        self.lines.push(RenderedLine::new(content, line_type));
    }

    fn blank(&mut self) {
        self.push(String::new(), LineType::Empty);
    }

    fn push_wrapped(
        &mut self,
        spans: &[InlineSpan],
        line_type: LineType,
        prefix_first: &str,
        prefix_next: &str,
    ) {
        for line_spans in wrap_spans(spans, self.width, prefix_first, prefix_next) {
            let content = spans_to_string(&line_spans);
            self.lines
                .push(RenderedLine::with_spans(content, line_type, line_spans));
        }
    }

    fn block<'a>(&mut self, node: &'a AstNode<'a>, depth: usize, list_marker: Option<&str>) {
        match &node.data.borrow().value {
            NodeValue::Heading(heading) => {
                if !self.lines.is_empty() {
                    ensure_trailing_empty_lines(&mut self.lines, 1);
                }
                let spans = collect_inline_spans(node);
                self.push_wrapped(&spans, LineType::Heading(heading.level), "", "");
                self.blank();
            }

            NodeValue::Paragraph => {
                if let Some(alt) = sole_image_alt(node) {
                    self.push(format!("[Image: {alt}]"), LineType::Image);
                } else {
                    let spans = collect_inline_spans(node);
                    self.push_wrapped(&spans, LineType::Paragraph, "", "");
                }
                self.blank();
            }

            NodeValue::CodeBlock(code_block) => {
                let language = code_block
                    .info
                    .split_whitespace()
                    .next()
                    .filter(|s| !s.is_empty())
                    .map(ToString::to_string);
                let literal = code_block.literal.clone();
                self.code_block(language.as_deref(), &literal);
                self.blank();
            }

            NodeValue::List(list) => {
                let delimiter = match list.delimiter {
                    ListDelimType::Paren => ')',
                    ListDelimType::Period => '.',
                };
                let max_number = list.start + node.children().count().saturating_sub(1);
                let number_width = max_number.to_string().len();

                for (index, child) in node.children().enumerate() {
                    let marker = match list.list_type {
                        ListType::Bullet => "• ".to_string(),
                        ListType::Ordered => format!(
                            "{:>number_width$}{delimiter} ",
                            list.start + index
                        ),
                    };
                    self.block(child, depth + 1, Some(marker.as_str()));
                }
                if depth == 0 {
                    self.blank();
                }
            }

            NodeValue::Item(_) => {
                let marker = list_marker.unwrap_or("- ").to_string();
                self.list_item(node, depth, &marker);
            }

            NodeValue::TaskItem(symbol) => {
                let marker = if symbol.is_some() { "✓ " } else { "□ " };
                self.list_item(node, depth, marker);
            }

            NodeValue::BlockQuote => {
                self.blockquote(node, 1);
                self.blank();
            }

            NodeValue::ThematicBreak => {
                self.push("─".repeat(self.width), LineType::HorizontalRule);
                self.blank();
            }

            NodeValue::Table(_) => {
                for line in render_table(node, self.width) {
                    self.push(line, LineType::Table);
                }
                self.blank();
            }

            // Raw HTML is left out of the preview, matching the HTML output.
            NodeValue::HtmlBlock(_) => {}

            _ => {
                for child in node.children() {
                    self.block(child, depth, list_marker);
                }
            }
        }
    }

    fn list_item<'a>(&mut self, node: &'a AstNode<'a>, depth: usize, marker: &str) {
        let indent = "  ".repeat(depth.saturating_sub(1));
        let prefix_first = format!("{indent}{marker}");
        let prefix_next = format!("{indent}{}", " ".repeat(marker.chars().count()));
        let mut paragraphs = 0usize;

        for child in node.children() {
            let is_paragraph = matches!(child.data.borrow().value, NodeValue::Paragraph);
            if is_paragraph {
                if paragraphs > 0 {
                    self.push(String::new(), LineType::ListItem(depth));
                }
                let spans = collect_inline_spans(child);
                let prefix = if paragraphs == 0 {
                    &prefix_first
                } else {
                    &prefix_next
                };
                self.push_wrapped(&spans, LineType::ListItem(depth), prefix, &prefix_next);
                paragraphs += 1;
            } else {
                self.block(child, depth, None);
            }
        }

        if paragraphs == 0 {
            self.push(prefix_first.trim_end().to_string(), LineType::ListItem(depth));
        }
    }

    fn blockquote<'a>(&mut self, node: &'a AstNode<'a>, quote_depth: usize) {
        let prefix = quote_prefix(quote_depth);
        for child in node.children() {
            match &child.data.borrow().value {
                NodeValue::Paragraph => {
                    let spans = collect_inline_spans(child);
                    self.push_wrapped(&spans, LineType::BlockQuote, &prefix, &prefix);
                }
                NodeValue::BlockQuote => self.blockquote(child, quote_depth + 1),
                _ => {
                    let text = extract_text(child);
                    for raw_line in text.lines() {
                        let spans = [InlineSpan::new(raw_line.to_string(), InlineStyle::default())];
                        self.push_wrapped(&spans, LineType::BlockQuote, &prefix, &prefix);
                    }
                }
            }
        }
    }

    fn code_block(&mut self, language: Option<&str>, literal: &str) {
        let content_width = literal
            .lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0)
            .min(self.width.saturating_sub(4 + CODE_RIGHT_PADDING).max(1));
        let label = format!(" {} ", language.unwrap_or("code"));
        let frame_inner_width = content_width + 2 + CODE_RIGHT_PADDING;
        let visible_label: String = label.chars().take(frame_inner_width).collect();
        self.push(
            format!(
                "┌{}{}┐",
                visible_label,
                "─".repeat(frame_inner_width.saturating_sub(visible_label.chars().count()))
            ),
            LineType::CodeBlock,
        );

        let code_style = InlineStyle {
            code: true,
            ..InlineStyle::default()
        };
        for raw_line in literal.lines() {
            let body: String = raw_line.chars().take(content_width).collect();
            let padding =
                " ".repeat(content_width.saturating_sub(body.chars().count()) + CODE_RIGHT_PADDING);
            let spans = vec![
                InlineSpan::new("│ ".to_string(), InlineStyle::default()),
                InlineSpan::new(body, code_style),
                InlineSpan::new(format!("{padding} │"), InlineStyle::default()),
            ];
            let content = spans_to_string(&spans);
            self.lines
                .push(RenderedLine::with_spans(content, LineType::CodeBlock, spans));
        }

        self.push(
            format!("└{}┘", "─".repeat(frame_inner_width)),
            LineType::CodeBlock,
        );
    }
}

fn ensure_trailing_empty_lines(lines: &mut Vec<RenderedLine>, count: usize) {
    let existing = lines
        .iter()
        .rev()
        .take_while(|line| matches!(line.line_type(), LineType::Empty))
        .count();
    for _ in existing..count {
        lines.push(RenderedLine::new(String::new(), LineType::Empty));
    }
}

fn quote_prefix(depth: usize) -> String {
    let mut prefix = String::from("  ");
    for _ in 0..depth {
        prefix.push_str("│ ");
    }
    prefix
}

/// Alt text of a paragraph that holds nothing but a single image.
fn sole_image_alt<'a>(node: &'a AstNode<'a>) -> Option<String> {
    let mut children = node.children();
    let first = children.next()?;
    if children.next().is_some() {
        return None;
    }
    let NodeValue::Image(image) = &first.data.borrow().value else {
        return None;
    };
    let alt = extract_text(first);
    Some(if alt.is_empty() { image.url.clone() } else { alt })
}

fn render_table<'a>(table_node: &'a AstNode<'a>, wrap_width: usize) -> Vec<String> {
    let (alignments, mut rows, has_header) = collect_table_rows(table_node);
    let num_cols = rows.iter().map(Vec::len).max().unwrap_or(0);
    if num_cols == 0 {
        return Vec::new();
    }

    for row in &mut rows {
        row.resize(num_cols, String::new());
    }

    let mut col_widths = vec![1_usize; num_cols];
    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            col_widths[idx] = col_widths[idx].max(UnicodeWidthStr::width(cell.as_str()));
        }
    }

    // Row width is 1 + sum(col_width + 3); shrink the widest column until it fits.
    let max_table_width = wrap_width.max(4);
    while 1 + col_widths.iter().sum::<usize>() + (3 * num_cols) > max_table_width {
        let Some((widest_idx, _)) = col_widths.iter().enumerate().max_by_key(|(_, w)| **w) else {
            break;
        };
        if col_widths[widest_idx] <= 1 {
            break;
        }
        col_widths[widest_idx] -= 1;
    }

    let mut lines = Vec::with_capacity(rows.len() + 3);
    lines.push(render_table_border(&col_widths, '┌', '┬', '┐'));
    for (idx, row) in rows.iter().enumerate() {
        lines.push(render_table_row(row, &col_widths, &alignments));
        if has_header && idx == 0 {
            lines.push(render_table_border(&col_widths, '├', '┼', '┤'));
        }
    }
    lines.push(render_table_border(&col_widths, '└', '┴', '┘'));
    lines
}

fn collect_table_rows<'a>(
    table_node: &'a AstNode<'a>,
) -> (Vec<TableAlignment>, Vec<Vec<String>>, bool) {
    let alignments = match &table_node.data.borrow().value {
        NodeValue::Table(table) => table.alignments.clone(),
        _ => Vec::new(),
    };

    let mut rows = Vec::new();
    let mut has_header = false;
    for row_node in table_node.children() {
        let NodeValue::TableRow(is_header) = row_node.data.borrow().value else {
            continue;
        };
        has_header |= is_header;
        let cells = row_node
            .children()
            .filter(|cell| matches!(cell.data.borrow().value, NodeValue::TableCell))
            .map(|cell| {
                extract_text(cell)
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();
        rows.push(cells);
    }

    (alignments, rows, has_header)
}

fn render_table_border(widths: &[usize], left: char, middle: char, right: char) -> String {
    let inner = widths
        .iter()
        .map(|width| "─".repeat(width + 2))
        .collect::<Vec<_>>()
        .join(&middle.to_string());
    format!("{left}{inner}{right}")
}

fn render_table_row(cells: &[String], widths: &[usize], alignments: &[TableAlignment]) -> String {
    let mut out = String::from("│");
    for (idx, width) in widths.iter().copied().enumerate() {
        let content = truncate_to_width(cells.get(idx).map_or("", String::as_str), width);
        let padding = width.saturating_sub(UnicodeWidthStr::width(content.as_str()));

        out.push(' ');
        match alignments.get(idx).copied().unwrap_or(TableAlignment::None) {
            TableAlignment::Right => {
                out.push_str(&" ".repeat(padding));
                out.push_str(&content);
            }
            TableAlignment::Center => {
                let left = padding / 2;
                out.push_str(&" ".repeat(left));
                out.push_str(&content);
                out.push_str(&" ".repeat(padding - left));
            }
            TableAlignment::Left | TableAlignment::None => {
                out.push_str(&content);
                out.push_str(&" ".repeat(padding));
            }
        }
        out.push_str(" │");
    }
    out
}

fn truncate_to_width(text: &str, max_width: usize) -> String {
    let mut out = String::new();
    let mut width = 0usize;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width {
            break;
        }
        out.push(ch);
        width += ch_width;
    }
    out
}

fn extract_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    extract_text_recursive(node, &mut text);
    text
}

fn extract_text_recursive<'a>(node: &'a AstNode<'a>, text: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(t) => text.push_str(t),
        NodeValue::Code(c) => text.push_str(&c.literal),
        NodeValue::SoftBreak | NodeValue::LineBreak => text.push(' '),
        _ => {
            for child in node.children() {
                extract_text_recursive(child, text);
            }
        }
    }
}

fn collect_inline_spans<'a>(node: &'a AstNode<'a>) -> Vec<InlineSpan> {
    let mut spans = Vec::new();
    for child in node.children() {
        collect_inline_spans_recursive(child, InlineStyle::default(), &mut spans);
    }
    spans
}

fn collect_inline_spans_recursive<'a>(
    node: &'a AstNode<'a>,
    style: InlineStyle,
    spans: &mut Vec<InlineSpan>,
) {
    let mut next = style;
    match &node.data.borrow().value {
        NodeValue::List(_) | NodeValue::Item(_) | NodeValue::HtmlInline(_) => return,
        NodeValue::Text(t) => {
            spans.push(InlineSpan::new(t.clone(), style));
            return;
        }
        NodeValue::Code(code) => {
            let code_style = InlineStyle {
                code: true,
                link: style.link,
                ..InlineStyle::default()
            };
            spans.push(InlineSpan::new(code.literal.clone(), code_style));
            return;
        }
        NodeValue::Image(image) => {
            let alt = extract_text(node);
            let label = if alt.is_empty() { image.url.clone() } else { alt };
            spans.push(InlineSpan::new(format!("[Image: {label}]"), style));
            return;
        }
        NodeValue::SoftBreak | NodeValue::LineBreak => {
            spans.push(InlineSpan::new(" ".to_string(), style));
            return;
        }
        NodeValue::Emph => next.emphasis = true,
        NodeValue::Strong => next.strong = true,
        NodeValue::Strikethrough => next.strikethrough = true,
        NodeValue::Link(_) => next.link = true,
        _ => {}
    }
    for child in node.children() {
        collect_inline_spans_recursive(child, next, spans);
    }
}

/// Greedy word wrap over styled spans, measured in display columns.
fn wrap_spans(
    spans: &[InlineSpan],
    width: usize,
    prefix_first: &str,
    prefix_next: &str,
) -> Vec<Vec<InlineSpan>> {
    let tokens: Vec<InlineSpan> = spans.iter().flat_map(split_inline_tokens).collect();

    let mut lines: Vec<Vec<InlineSpan>> = Vec::new();
    let mut current: Vec<InlineSpan> = Vec::new();
    let mut current_width = 0usize;
    let mut has_word = false;

    let start_line = |prefix: &str, current: &mut Vec<InlineSpan>, current_width: &mut usize| {
        current.clear();
        if !prefix.is_empty() {
            current.push(InlineSpan::new(prefix.to_string(), InlineStyle::default()));
        }
        *current_width = UnicodeWidthStr::width(prefix);
    };

    start_line(prefix_first, &mut current, &mut current_width);

    for token in tokens {
        let token_width = UnicodeWidthStr::width(token.text());
        let token_is_ws = token.text().chars().all(char::is_whitespace);

        if current_width + token_width > width && has_word {
            lines.push(std::mem::take(&mut current));
            start_line(prefix_next, &mut current, &mut current_width);
            has_word = false;
        }

        if token_is_ws && !has_word {
            // Drop leading whitespace at wrapped line starts.
            continue;
        }

        current_width += token_width;
        current.push(token);
        has_word = true;
    }

    // Trailing whitespace would push the visible text past the pane edge.
    while current
        .last()
        .is_some_and(|span| has_word && span.text().chars().all(char::is_whitespace))
    {
        current.pop();
    }

    lines.push(current);
    lines
}

fn split_inline_tokens(span: &InlineSpan) -> Vec<InlineSpan> {
    let mut out = Vec::new();
    let mut buf = String::new();
    let mut ws_state: Option<bool> = None;

    for ch in span.text().chars() {
        let is_ws = ch.is_whitespace();
        if ws_state.is_some_and(|state| state != is_ws) {
            out.push(InlineSpan::new(std::mem::take(&mut buf), span.style()));
        }
        buf.push(ch);
        ws_state = Some(is_ws);
    }

    if !buf.is_empty() {
        out.push(InlineSpan::new(buf, span.style()));
    }
    out
}

fn spans_to_string(spans: &[InlineSpan]) -> String {
    spans.iter().map(InlineSpan::text).collect()
}
