//! Message region widget.

use crate::state::ScrollWindow;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthChar;

/// Renders prompt notices followed by message bodies.
///
/// Indices are not shown. Text wider than the pane continues on the next row.
/// When there are more rows than fit, the newest rows win, like a terminal that
/// scrolls.
pub struct ChatPane<'a> {
    notices: &'a [String],
    window: &'a ScrollWindow,
}

impl<'a> ChatPane<'a> {
    /// Pane over `notices` and the window's messages.
    pub fn new(notices: &'a [String], window: &'a ScrollWindow) -> Self {
        Self { notices, window }
    }

    fn rows(&self, width: usize) -> Vec<Line<'static>> {
        let notice_style = Style::default().add_modifier(Modifier::BOLD);
        let notices = self.notices.iter().flat_map(|notice| {
            wrap_rows(notice, width)
                .into_iter()
                .map(move |row| Line::styled(row, notice_style))
        });
        let bodies = self
            .window
            .iter()
            .flat_map(|message| wrap_rows(message.body(), width).into_iter().map(Line::raw));
        notices.chain(bodies).collect()
    }
}

/// Break `text` into rows of at most `width` columns.
///
/// Breaks fall between characters. Empty text is one empty row. Zero-width
/// characters stay on the row of the character before them.
fn wrap_rows(text: &str, width: usize) -> Vec<String> {
    let mut rows = Vec::new();
    let mut row = String::new();
    let mut used = 0;

    for ch in text.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used > 0 && used + ch_width > width {
            rows.push(std::mem::take(&mut row));
            used = 0;
        }
        row.push(ch);
        used += ch_width;
    }
    rows.push(row);
    rows
}

impl Widget for ChatPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let mut lines = self.rows(usize::from(area.width));
        let overflow = lines.len().saturating_sub(usize::from(area.height));
        lines.drain(..overflow);

        Paragraph::new(lines).render(area, buf);
    }
}
