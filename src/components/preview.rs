use std::process::{Child, Command};

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

use crate::markdown::{self, renderer::RenderedMarkdown};
use crate::theme;

/// A clickable link region in the rendered preview buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickableLink {
    pub y: u16,
    pub x_start: u16,
    pub x_end: u16,
    pub url: String,
}

/// What the preview learned about itself during the last render.
#[derive(Debug, Default)]
pub struct PreviewState {
    pub content_height: u16,
    pub viewport_height: u16,
    /// Clickable link regions from the last render.
    pub click_links: Vec<ClickableLink>,
}

impl PreviewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Largest offset that still fills the viewport.
    pub fn max_scroll(&self) -> u16 {
        self.content_height.saturating_sub(self.viewport_height)
    }

    /// Find the URL at a given screen position, if any.
    pub fn url_at(&self, x: u16, y: u16) -> Option<&str> {
        self.click_links
            .iter()
            .find(|link| link.y == y && x >= link.x_start && x < link.x_end)
            .map(|link| link.url.as_str())
    }
}

/// URL schemes handed to the system opener. Anything else is shown but not
/// clickable.
const OPENABLE_SCHEMES: [&str; 3] = ["http://", "https://", "mailto:"];

/// Draws `content` into `area`, starting `scroll` lines down (clamped).
pub fn render(frame: &mut Frame, area: Rect, content: &str, scroll: u16, state: &mut PreviewState) {
    let rendered =
        markdown::renderer::render_markdown(content, area.width.saturating_sub(2) as usize);

    state.content_height = u16::try_from(rendered.text.lines.len()).unwrap_or(u16::MAX);
    state.viewport_height = area.height;
    let offset = scroll.min(state.max_scroll());
    state.click_links = link_regions(area, offset, &rendered);

    let paragraph = Paragraph::new(rendered.text)
        .style(theme::editor_style())
        .scroll((offset, 0));
    frame.render_widget(paragraph, area);

    if state.content_height > area.height {
        let mut scrollbar_state = ScrollbarState::new(state.max_scroll() as usize)
            .position(offset as usize)
            .viewport_content_length(area.height as usize);
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .thumb_style(Style::default().fg(theme::LINE_NUMBER))
            .track_style(Style::default().fg(theme::BORDER));
        frame.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
    }
}

/// Whether `url` may be passed to the system opener.
pub fn is_openable(url: &str) -> bool {
    let url = url.trim_start().to_ascii_lowercase();
    OPENABLE_SCHEMES.iter().any(|scheme| url.starts_with(scheme))
}

/// Open a URL in the system default browser.
pub fn open_url(url: &str) {
    if !is_openable(url) {
        tracing::warn!(url, "refusing to open link");
        return;
    }
    if let Err(e) = spawn_opener(url) {
        tracing::warn!(url, error = %e, "could not open link");
    }
}

#[cfg(target_os = "macos")]
fn spawn_opener(url: &str) -> std::io::Result<Child> {
    Command::new("open").arg(url).spawn()
}

// explorer takes the URL as a plain argument, no shell parsing
#[cfg(target_os = "windows")]
fn spawn_opener(url: &str) -> std::io::Result<Child> {
    Command::new("explorer").arg(url).spawn()
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn spawn_opener(url: &str) -> std::io::Result<Child> {
    Command::new("xdg-open").arg(url).spawn()
}

/// Maps the link text positions of the rendered document onto screen cells
/// for the lines visible at `offset`.
fn link_regions(area: Rect, offset: u16, rendered: &RenderedMarkdown) -> Vec<ClickableLink> {
    let top = offset as usize;
    let visible = top..top + area.height as usize;
    let to_x = |col: usize| area.x.saturating_add(u16::try_from(col).unwrap_or(u16::MAX));

    rendered
        .link_spans
        .iter()
        .filter(|span| visible.contains(&span.line))
        .filter_map(|span| {
            let url = rendered.link_urls.get(span.url)?;
            if !is_openable(url) {
                return None;
            }
            let x_start = to_x(span.col_start);
            let x_end = to_x(span.col_end).min(area.right());
            (x_start < x_end).then(|| ClickableLink {
                y: area.y + (span.line - top) as u16,
                x_start,
                x_end,
                url: url.clone(),
            })
        })
        .collect()
}
