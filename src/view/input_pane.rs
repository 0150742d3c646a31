//! Input region widget: a separator row, then the prompt and the line being typed.

use crate::codec;
use crate::state::InputLine;
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthChar;

const PROMPT: &str = "> ";
/// Leading blank column plus the prompt.
const PROMPT_WIDTH: usize = 1 + PROMPT.len();

/// Display width of `chars` in terminal columns.
///
/// Control characters count as zero, wide (CJK) characters as two.
pub fn cursor_column(chars: &[char]) -> usize {
    chars
        .iter()
        .map(|ch| UnicodeWidthChar::width(*ch).unwrap_or(0))
        .sum()
}

/// Horizontal scroll for a line that may not fit.
///
/// Returns `(start, column)`: the index of the first visible character and the
/// cursor's column relative to it. Leading characters are dropped until the cursor
/// fits inside `available` columns.
pub fn input_viewport(line: &InputLine, available: usize) -> (usize, usize) {
    let before = line.before_cursor();
    let mut start = 0;
    let mut column = cursor_column(before);

    while column >= available && start < before.len() {
        column -= UnicodeWidthChar::width(before[start]).unwrap_or(0);
        start += 1;
    }

    (start, column)
}

/// Separator, `> ` prompt, and the part of the line that fits.
pub struct InputPane<'a> {
    line: &'a InputLine,
}

impl<'a> InputPane<'a> {
    /// Pane for `line`.
    pub fn new(line: &'a InputLine) -> Self {
        Self { line }
    }

    fn block() -> Block<'static> {
        Block::default().borders(Borders::TOP)
    }

    fn text_width(inner: Rect) -> usize {
        usize::from(inner.width).saturating_sub(PROMPT_WIDTH)
    }

    /// Where the terminal cursor belongs, or `None` if `area` has no room for text.
    pub fn cursor_position(&self, area: Rect) -> Option<Position> {
        let inner = Self::block().inner(area);
        let available = Self::text_width(inner);
        if inner.height == 0 || available == 0 {
            return None;
        }

        let (_, column) = input_viewport(self.line, available);
        let x = usize::from(inner.x) + PROMPT_WIDTH + column;
        Some(Position::new(u16::try_from(x).ok()?, inner.y))
    }
}

impl Widget for InputPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Self::block();
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        let (start, _) = input_viewport(self.line, Self::text_width(inner));
        let visible = codec::from_wide(&self.line.text()[start..]);

        let prompt = Line::from(vec![
            Span::raw(" "),
            Span::styled(PROMPT, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(visible),
        ]);
        Paragraph::new(prompt).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::line_editor::{handle_char_input, handle_cursor_left};

    fn typed(text: &str) -> InputLine {
        text.chars().fold(InputLine::new(), handle_char_input)
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    #[test]
    fn cursor_column_counts_wide_characters_twice() {
        assert_eq!(cursor_column(&['a', 'b']), 2);
        assert_eq!(cursor_column(&['你', '好']), 4);
        assert_eq!(cursor_column(&[]), 0);
    }

    #[test]
    fn viewport_starts_at_zero_when_line_fits() {
        let line = typed("hello");
        assert_eq!(input_viewport(&line, 20), (0, 5));
    }

    #[test]
    fn viewport_scrolls_to_keep_cursor_visible() {
        let line = typed("abcdefghij");
        // Cursor at column 10 needs to land in columns 0..5.
        assert_eq!(input_viewport(&line, 5), (6, 4));
    }

    #[test]
    fn viewport_follows_cursor_not_line_end() {
        let line = (0..8).fold(typed("abcdefghij"), |l, _| handle_cursor_left(l));
        assert_eq!(line.cursor(), 2);
        assert_eq!(input_viewport(&line, 5), (0, 2));
    }

    #[test]
    fn viewport_handles_wide_characters() {
        let line = typed("你好世界");
        // Cursor at column 8; dropping two wide chars leaves column 4.
        assert_eq!(input_viewport(&line, 5), (2, 4));
    }

    #[test]
    fn renders_separator_and_prompt() {
        let area = Rect::new(0, 0, 12, 2);
        let mut buf = Buffer::empty(area);
        InputPane::new(&typed("hi")).render(area, &mut buf);

        assert_eq!(row(&buf, 0), "\u{2500}".repeat(12));
        assert_eq!(row(&buf, 1), " > hi");
    }

    #[test]
    fn cursor_sits_after_prompt_and_text() {
        let area = Rect::new(0, 10, 20, 2);
        let pane_line = typed("abc");
        let pane = InputPane::new(&pane_line);
        assert_eq!(pane.cursor_position(area), Some(Position::new(6, 11)));
    }

    #[test]
    fn cursor_accounts_for_wide_characters() {
        let area = Rect::new(0, 0, 20, 2);
        let pane_line = typed("你好");
        let pane = InputPane::new(&pane_line);
        assert_eq!(pane.cursor_position(area), Some(Position::new(7, 1)));
    }

    #[test]
    fn no_cursor_without_room() {
        let line = typed("abc");
        let pane = InputPane::new(&line);
        assert_eq!(pane.cursor_position(Rect::new(0, 0, 20, 1)), None);
        assert_eq!(pane.cursor_position(Rect::new(0, 0, 3, 2)), None);
    }

    #[test]
    fn long_line_shows_its_tail() {
        let area = Rect::new(0, 0, 8, 2);
        let mut buf = Buffer::empty(area);
        InputPane::new(&typed("abcdefghij")).render(area, &mut buf);

        // Five text columns; the cursor needs one of them.
        assert_eq!(row(&buf, 1), " > ghij");
    }
}
