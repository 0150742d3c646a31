//! Domain-level key events independent of the terminal library.

/// A single key press as seen by the line editor.
///
/// The mapping from `crossterm::event::KeyEvent` to `KeyEvent` is handled by
/// [`crate::config::KeyBindings`]; keys without a binding never reach the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyEvent {
    /// Insert this character at the cursor.
    Printable(char),
    /// Delete the character left of the cursor.
    Backspace,
    /// Move the cursor one character left.
    Left,
    /// Move the cursor one character right.
    Right,
    /// Ask the server for older history.
    Up,
    /// Ask the server for newer history.
    Down,
    /// Submit the current line.
    Enter,
}

impl KeyEvent {
    /// True for the keys that end an edit cycle without changing the text.
    pub fn is_scroll(self) -> bool {
        matches!(self, KeyEvent::Up | KeyEvent::Down)
    }
}
