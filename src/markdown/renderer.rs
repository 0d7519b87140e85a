use pulldown_cmark::{Alignment, CodeBlockKind, Event, Parser, Tag, TagEnd};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span, Text},
};

use crate::markdown::code_highlight;
use crate::markdown::html::parser_options;
use crate::theme;

/// Preview-pane projection of a note.
pub struct RenderedMarkdown {
    pub text: Text<'static>,
    /// Link URLs in document order.
    pub link_urls: Vec<String>,
    /// Where each piece of link text landed. A link that wraps has one
    /// entry per line. Links inside tables are not recorded.
    pub link_spans: Vec<LinkSpan>,
}

/// Position of link text within `RenderedMarkdown::text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSpan {
    /// Index into `text.lines`.
    pub line: usize,
    /// Display columns, end exclusive.
    pub col_start: usize,
    pub col_end: usize,
    /// Index into `link_urls`.
    pub url: usize,
}

/// Accumulates a table until its end tag, then lays it out in one go.
#[derive(Default)]
struct TableState {
    rows: Vec<Vec<Vec<Span<'static>>>>,
    cell: Vec<Span<'static>>,
    header_rows: usize,
    alignments: Vec<Alignment>,
}

pub fn render_markdown(content: &str, width: usize) -> RenderedMarkdown {
    let parser = Parser::new_ext(content, parser_options());

    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut current_spans: Vec<Span<'static>> = Vec::new();
    let mut style_stack: Vec<Style> = vec![Style::default().fg(theme::FG)];
    let mut blockquote_depth: usize = 0;

    let mut in_code_block = false;
    let mut code_block_lang = String::new();
    let mut code_block_content = String::new();

    // None = unordered, Some(counter) = ordered
    let mut list_stack: Vec<Option<u64>> = Vec::new();

    let mut table: Option<TableState> = None;

    let mut link_url = String::new();
    let mut link_urls: Vec<String> = Vec::new();
    let mut link_spans: Vec<LinkSpan> = Vec::new();
    let mut image_url = String::new();

    for event in parser {
        match event {
            Event::Start(tag) => match tag {
                Tag::Heading { level, .. } => {
                    flush_line(&mut lines, &mut current_spans);
                    let prev_blank = lines.last().map_or(true, is_blank);
                    if !prev_blank {
                        push_blank_line(&mut lines, blockquote_depth);
                    }
                    push_bq_prefix(&mut current_spans, blockquote_depth);
                    current_spans.push(Span::styled(
                        format!("{} ", "#".repeat(level as usize)),
                        theme::heading_style(),
                    ));
                    style_stack.push(theme::heading_style());
                }
                Tag::Strong => {
                    let base = current_style(&style_stack);
                    style_stack.push(compose_style(base, theme::bold_style()));
                }
                Tag::Emphasis => {
                    let base = current_style(&style_stack);
                    style_stack.push(compose_style(base, theme::italic_style()));
                }
                Tag::Strikethrough => {
                    let base = current_style(&style_stack);
                    style_stack.push(base.add_modifier(Modifier::CROSSED_OUT));
                }
                Tag::Link { dest_url, .. } => {
                    let base = current_style(&style_stack);
                    style_stack.push(compose_style(base, theme::link_style()));
                    link_url = dest_url.to_string();
                }
                Tag::Image { dest_url, .. } => {
                    image_url = dest_url.to_string();
                    push_bq_prefix(&mut current_spans, blockquote_depth);
                    current_spans.push(Span::styled("[image: ", theme::muted_style()));
                    style_stack.push(theme::italic_style());
                }
                Tag::CodeBlock(kind) => {
                    flush_line(&mut lines, &mut current_spans);
                    in_code_block = true;
                    code_block_content.clear();
                    code_block_lang = match kind {
                        CodeBlockKind::Fenced(lang) => lang.to_string(),
                        CodeBlockKind::Indented => String::new(),
                    };
                }
                Tag::BlockQuote(_) => {
                    flush_line(&mut lines, &mut current_spans);
                    blockquote_depth += 1;
                    style_stack.push(theme::quote_style());
                }
                Tag::List(start) => {
                    flush_line(&mut lines, &mut current_spans);
                    list_stack.push(start);
                }
                Tag::Item => {
                    flush_line(&mut lines, &mut current_spans);
                    push_bq_prefix(&mut current_spans, blockquote_depth);
                    let indent = "  ".repeat(list_stack.len().saturating_sub(1));
                    let bullet = match list_stack.last_mut() {
                        Some(Some(counter)) => {
                            let n = *counter;
                            *counter += 1;
                            format!("{}{}. ", indent, n)
                        }
                        _ => format!("{}• ", indent),
                    };
                    current_spans.push(Span::styled(bullet, Style::default().fg(theme::FG)));
                }
                Tag::Table(alignments) => {
                    flush_line(&mut lines, &mut current_spans);
                    table = Some(TableState {
                        alignments,
                        ..TableState::default()
                    });
                }
                Tag::TableHead | Tag::TableRow => {
                    if let Some(t) = table.as_mut() {
                        t.rows.push(Vec::new());
                    }
                }
                Tag::TableCell => {
                    if let Some(t) = table.as_mut() {
                        t.cell.clear();
                    }
                }
                Tag::FootnoteDefinition(label) => {
                    flush_line(&mut lines, &mut current_spans);
                    push_bq_prefix(&mut current_spans, blockquote_depth);
                    current_spans.push(Span::styled(format!("[{}]: ", label), theme::muted_style()));
                }
                _ => {}
            },
            Event::End(tag_end) => match tag_end {
                TagEnd::Heading(level) => {
                    style_stack.pop();
                    flush_line(&mut lines, &mut current_spans);
                    let rule_char = match level as u8 {
                        1 => Some("━"),
                        2 => Some("─"),
                        _ => None,
                    };
                    if let Some(ch) = rule_char {
                        let mut spans = Vec::new();
                        push_bq_prefix(&mut spans, blockquote_depth);
                        spans.push(Span::styled(
                            ch.repeat(width.saturating_sub(blockquote_depth * 2)),
                            Style::default().fg(theme::HEADING),
                        ));
                        lines.push(Line::from(spans));
                    }
                    push_blank_line(&mut lines, blockquote_depth);
                }
                TagEnd::Strong | TagEnd::Emphasis | TagEnd::Strikethrough => {
                    style_stack.pop();
                }
                TagEnd::Link => {
                    style_stack.pop();
                    if !link_url.is_empty() {
                        current_spans.push(Span::styled(format!(" ({})", link_url), theme::muted_style()));
                        link_urls.push(std::mem::take(&mut link_url));
                    }
                }
                TagEnd::Image => {
                    style_stack.pop();
                    current_spans.push(Span::styled(
                        format!("] ({})", std::mem::take(&mut image_url)),
                        theme::muted_style(),
                    ));
                }
                TagEnd::CodeBlock => {
                    in_code_block = false;
                    let code_width = width.saturating_sub(blockquote_depth * 2);
                    for line in code_highlight::highlight_code(&code_block_content, &code_block_lang, code_width) {
                        let mut spans = Vec::new();
                        push_bq_prefix(&mut spans, blockquote_depth);
                        spans.extend(line.spans);
                        lines.push(Line::from(spans));
                    }
                    push_blank_line(&mut lines, blockquote_depth);
                    code_block_content.clear();
                    code_block_lang.clear();
                }
                TagEnd::BlockQuote(_) => {
                    flush_line(&mut lines, &mut current_spans);
                    style_stack.pop();
                    blockquote_depth = blockquote_depth.saturating_sub(1);
                }
                TagEnd::List(_) => {
                    flush_line(&mut lines, &mut current_spans);
                    list_stack.pop();
                    if list_stack.is_empty() {
                        push_blank_line(&mut lines, blockquote_depth);
                    }
                }
                TagEnd::Item => {
                    flush_line(&mut lines, &mut current_spans);
                }
                TagEnd::TableHead => {
                    if let Some(t) = table.as_mut() {
                        t.header_rows = t.rows.len();
                    }
                }
                TagEnd::TableCell => {
                    if let Some(t) = table.as_mut() {
                        let cell = std::mem::take(&mut t.cell);
                        if let Some(row) = t.rows.last_mut() {
                            row.push(cell);
                        }
                    }
                }
                TagEnd::Table => {
                    if let Some(t) = table.take() {
                        render_table(&t, width, blockquote_depth, &mut lines);
                    }
                    push_blank_line(&mut lines, blockquote_depth);
                }
                TagEnd::Paragraph => {
                    flush_line(&mut lines, &mut current_spans);
                    if list_stack.is_empty() {
                        push_blank_line(&mut lines, blockquote_depth);
                    }
                }
                TagEnd::FootnoteDefinition => {
                    flush_line(&mut lines, &mut current_spans);
                }
                _ => {}
            },
            Event::Text(text) => {
                let style = current_style(&style_stack);
                if in_code_block {
                    code_block_content.push_str(&text);
                } else if let Some(t) = table.as_mut() {
                    t.cell.push(Span::styled(text.to_string(), style));
                } else {
                    push_bq_prefix(&mut current_spans, blockquote_depth);
                    let chunks = word_wrap(&text, width, &current_spans);
                    let last = chunks.len().saturating_sub(1);
                    for (i, chunk) in chunks.into_iter().enumerate() {
                        let span = Span::styled(chunk, style);
                        if !link_url.is_empty() {
                            record_link_span(&mut link_spans, lines.len(), &current_spans, &span, link_urls.len());
                        }
                        current_spans.push(span);
                        if i < last {
                            flush_line(&mut lines, &mut current_spans);
                            push_bq_prefix(&mut current_spans, blockquote_depth);
                        }
                    }
                }
            }
            Event::Code(code) => {
                let span = Span::styled(format!(" {} ", code), theme::code_style());
                if let Some(t) = table.as_mut() {
                    t.cell.push(span);
                } else {
                    push_bq_prefix(&mut current_spans, blockquote_depth);
                    if !link_url.is_empty() {
                        record_link_span(&mut link_spans, lines.len(), &current_spans, &span, link_urls.len());
                    }
                    current_spans.push(span);
                }
            }
            // Raw HTML is shown as source text, never interpreted.
            Event::Html(raw) | Event::InlineHtml(raw) => {
                for (i, part) in raw.trim_end_matches('\n').split('\n').enumerate() {
                    if i > 0 {
                        flush_line(&mut lines, &mut current_spans);
                    }
                    push_bq_prefix(&mut current_spans, blockquote_depth);
                    current_spans.push(Span::styled(part.to_string(), theme::muted_style()));
                }
            }
            Event::SoftBreak => {
                if table.is_none() {
                    current_spans.push(Span::raw(" "));
                }
            }
            Event::HardBreak => {
                if table.is_none() {
                    flush_line(&mut lines, &mut current_spans);
                }
            }
            Event::FootnoteReference(label) => {
                current_spans.push(Span::styled(
                    format!("[^{}]", label),
                    Style::default().fg(theme::LINK),
                ));
            }
            Event::TaskListMarker(checked) => {
                let (marker, style) = if checked {
                    ("[x] ", Style::default().fg(theme::SUCCESS))
                } else {
                    ("[ ] ", Style::default().fg(theme::FG))
                };
                current_spans.push(Span::styled(marker, style));
            }
            Event::Rule => {
                flush_line(&mut lines, &mut current_spans);
                let avail = width.saturating_sub(blockquote_depth * 2);
                let mut spans = Vec::new();
                push_bq_prefix(&mut spans, blockquote_depth);
                spans.push(Span::styled("─".repeat(avail), Style::default().fg(theme::BORDER)));
                lines.push(Line::from(spans));
                push_blank_line(&mut lines, blockquote_depth);
            }
            _ => {}
        }
    }

    flush_line(&mut lines, &mut current_spans);

    // Trailing blank lines only pad the scroll range.
    while lines.last().is_some_and(is_blank) {
        lines.pop();
    }

    RenderedMarkdown {
        text: Text::from(lines),
        link_urls,
        link_spans,
    }
}

/// Notes that `span` is about to be appended after `before` on line `line`.
fn record_link_span(out: &mut Vec<LinkSpan>, line: usize, before: &[Span], span: &Span, url: usize) {
    let col_start: usize = before.iter().map(Span::width).sum();
    out.push(LinkSpan {
        line,
        col_start,
        col_end: col_start + span.width(),
        url,
    });
}

/// Lays out a table with box-drawing borders, shrinking columns
/// proportionally when the natural width doesn't fit.
fn render_table(table: &TableState, width: usize, bq_depth: usize, lines: &mut Vec<Line<'static>>) {
    let num_cols = table.rows.iter().map(|r| r.len()).max().unwrap_or(0);
    if num_cols == 0 {
        return;
    }

    let mut col_widths = vec![1usize; num_cols];
    for row in &table.rows {
        for (j, cell) in row.iter().enumerate() {
            let w: usize = cell.iter().map(|s| s.width()).sum();
            col_widths[j] = col_widths[j].max(w);
        }
    }

    // "│ " + cells joined by " │ " + " │"
    let chrome = bq_depth * 2 + 4 + (num_cols - 1) * 3;
    let available = width.saturating_sub(chrome);
    let natural: usize = col_widths.iter().sum();
    if natural > available && available > 0 {
        for w in col_widths.iter_mut() {
            *w = (*w * available / natural).max(3);
        }
    }

    let border_style = Style::default().fg(theme::BORDER);
    for (i, row) in table.rows.iter().enumerate() {
        let mut spans: Vec<Span<'static>> = Vec::new();
        push_bq_prefix(&mut spans, bq_depth);
        spans.push(Span::styled("│ ", border_style));

        for j in 0..num_cols {
            let max_w = col_widths[j];
            let cell: Vec<Span<'static>> = row.get(j).map(|c| truncate_spans(c, max_w)).unwrap_or_default();
            let cell_w: usize = cell.iter().map(|s| s.width()).sum();
            let pad = max_w.saturating_sub(cell_w);
            let (left, right) = match table.alignments.get(j).copied().unwrap_or(Alignment::None) {
                Alignment::Right => (pad, 0),
                Alignment::Center => (pad / 2, pad - pad / 2),
                _ => (0, pad),
            };
            if left > 0 {
                spans.push(Span::raw(" ".repeat(left)));
            }
            spans.extend(cell);
            if right > 0 {
                spans.push(Span::raw(" ".repeat(right)));
            }
            let sep = if j + 1 < num_cols { " │ " } else { " │" };
            spans.push(Span::styled(sep, border_style));
        }
        lines.push(Line::from(spans));

        if i + 1 == table.header_rows {
            let mut sep: Vec<Span<'static>> = Vec::new();
            push_bq_prefix(&mut sep, bq_depth);
            let joined = col_widths
                .iter()
                .map(|w| "─".repeat(w + 2))
                .collect::<Vec<_>>()
                .join("┼");
            sep.push(Span::styled(format!("├{}┤", joined), border_style));
            lines.push(Line::from(sep));
        }
    }
}

fn truncate_spans(spans: &[Span<'static>], max_w: usize) -> Vec<Span<'static>> {
    let mut out = Vec::new();
    let mut remaining = max_w;
    for s in spans {
        let sw = s.width();
        if sw <= remaining {
            out.push(s.clone());
            remaining -= sw;
        } else {
            if remaining > 0 {
                let truncated: String = s.content.chars().take(remaining).collect();
                out.push(Span::styled(truncated, s.style));
            }
            break;
        }
    }
    out
}

fn flush_line(lines: &mut Vec<Line<'static>>, spans: &mut Vec<Span<'static>>) {
    if !spans.is_empty() {
        lines.push(Line::from(std::mem::take(spans)));
    }
}

fn is_blank(line: &Line) -> bool {
    line.spans
        .iter()
        .all(|s| s.content.trim().is_empty() || s.content.trim_matches(|c| c == '│' || c == ' ').is_empty())
}

fn current_style(stack: &[Style]) -> Style {
    stack.last().copied().unwrap_or_else(|| Style::default().fg(theme::FG))
}

/// Splits `text` into chunks that fit the remaining width of the current
/// line, breaking at spaces. The first chunk continues the existing spans.
fn word_wrap(text: &str, max_width: usize, existing_spans: &[Span]) -> Vec<String> {
    let mut col: usize = existing_spans.iter().map(|s| s.width()).sum();
    if max_width == 0 || col + text.chars().count() <= max_width {
        return vec![text.to_string()];
    }

    let mut result = Vec::new();
    let mut current = String::new();
    for word in text.split_inclusive(' ') {
        let word_w = word.chars().count();
        if col + word_w > max_width && !current.is_empty() {
            result.push(std::mem::take(&mut current));
            col = 0;
        }
        current.push_str(word);
        col += word_w;
    }
    if !current.is_empty() || result.is_empty() {
        result.push(current);
    }
    result
}

/// Compose two styles: overlay's colors win, but modifiers accumulate.
fn compose_style(base: Style, overlay: Style) -> Style {
    let mut result = overlay;
    result.add_modifier |= base.add_modifier;
    result
}

/// Push blockquote `│ ` prefix to spans if at start of a new line (spans empty).
fn push_bq_prefix(spans: &mut Vec<Span<'static>>, depth: usize) {
    if depth > 0 && spans.is_empty() {
        spans.push(Span::styled(
            "│ ".repeat(depth),
            Style::default().fg(theme::QUOTE_BORDER),
        ));
    }
}

/// Push a blank line, with blockquote prefix if inside a blockquote.
fn push_blank_line(lines: &mut Vec<Line<'static>>, bq_depth: usize) {
    let mut spans = Vec::new();
    push_bq_prefix(&mut spans, bq_depth);
    lines.push(Line::from(spans));
}
