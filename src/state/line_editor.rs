//! Input line editing (pure state transitions).
//!
//! One in-progress line plus a cursor, driven by [`KeyEvent`]s.
//! All functions are pure - no side effects, testable without a terminal.
//! The caller redraws after every transition.

use crate::codec;
use crate::model::KeyEvent;

/// The line being typed.
///
/// Invariant: `cursor <= text.len()`. The cursor is an insertion point, so
/// `cursor == text.len()` means end of line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputLine {
    text: Vec<char>,
    cursor: usize,
}

impl InputLine {
    /// Empty line with the cursor at 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// The characters, in order.
    pub fn text(&self) -> &[char] {
        &self.text
    }

    /// Cursor position, `0..=len()`.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// True if nothing has been typed.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Characters left of the cursor.
    pub fn before_cursor(&self) -> &[char] {
        &self.text[..self.cursor]
    }

    /// The line as a `String`.
    pub fn as_string(&self) -> String {
        codec::from_wide(&self.text)
    }
}

impl From<&str> for InputLine {
    /// Cursor at end of line.
    fn from(text: &str) -> Self {
        let text = codec::to_wide(text);
        let cursor = text.len();
        Self { text, cursor }
    }
}

/// Outcome of feeding one key to the editor.
///
/// `StillEditing` keeps the caller in its input loop; the other three end the edit
/// cycle, and the next cycle starts from an empty line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditResult {
    /// Line after the edit.
    StillEditing(InputLine),
    /// Enter was pressed; the finished text.
    Submitted(String),
    /// Up arrow.
    ScrollUpRequested,
    /// Down arrow.
    ScrollDownRequested,
}

/// Apply one key event to the current line.
pub fn apply(current: InputLine, event: KeyEvent) -> EditResult {
    match event {
        KeyEvent::Printable(ch) => EditResult::StillEditing(handle_char_input(current, ch)),
        KeyEvent::Backspace => EditResult::StillEditing(handle_backspace(current)),
        KeyEvent::Left => EditResult::StillEditing(handle_cursor_left(current)),
        KeyEvent::Right => EditResult::StillEditing(handle_cursor_right(current)),
        KeyEvent::Up => EditResult::ScrollUpRequested,
        KeyEvent::Down => EditResult::ScrollDownRequested,
        KeyEvent::Enter => EditResult::Submitted(current.as_string()),
    }
}

/// Insert the character at the cursor and advance the cursor.
/// At end of line this is a plain append.
pub fn handle_char_input(mut line: InputLine, ch: char) -> InputLine {
    line.text.insert(line.cursor, ch);
    line.cursor += 1;
    line
}

/// Delete the character left of the cursor.
/// No-op on an empty line or with the cursor at 0.
pub fn handle_backspace(mut line: InputLine) -> InputLine {
    if line.cursor > 0 {
        line.text.remove(line.cursor - 1);
        line.cursor -= 1;
    }
    line
}

/// Move the cursor left by one position. Saturates at 0.
pub fn handle_cursor_left(mut line: InputLine) -> InputLine {
    line.cursor = line.cursor.saturating_sub(1);
    line
}

/// Move the cursor right by one position. Saturates at end of line.
pub fn handle_cursor_right(mut line: InputLine) -> InputLine {
    line.cursor = (line.cursor + 1).min(line.text.len());
    line
}

#[cfg(test)]
#[path = "line_editor_tests.rs"]
mod tests;
