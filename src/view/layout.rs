//! Screen split: message region on top, two-row input region at the bottom.

use super::{ChatPane, InputPane, ScreenContent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    Frame,
};

/// Rows reserved for the input region (separator + prompt line).
pub const INPUT_HEIGHT: u16 = 2;

/// Split `area` into (messages, input).
pub fn split(area: Rect) -> (Rect, Rect) {
    let [messages, input] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(INPUT_HEIGHT)]).areas(area);
    (messages, input)
}

/// Render one full frame.
pub fn render_layout(frame: &mut Frame, content: &ScreenContent<'_>) {
    let (messages_area, input_area) = split(frame.area());

    frame.render_widget(ChatPane::new(content.notices, content.window), messages_area);

    let input = InputPane::new(content.input);
    if let Some(position) = input.cursor_position(input_area) {
        frame.set_cursor_position(position);
    }
    frame.render_widget(input, input_area);
}
