//! Keyboard bindings configuration.

use crate::model::KeyEvent;
use crossterm::event::{KeyCode, KeyEvent as TermKeyEvent, KeyEventKind, KeyModifiers};
use std::collections::HashMap;

/// What a terminal key press means to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// Feed to the line editor.
    Key(KeyEvent),
    /// Ctrl+C: leave the program.
    Interrupt,
}

/// Maps terminal key events to editor keys.
///
/// Editing keys live in a lookup table; any character typed without Ctrl/Alt is
/// printable.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<TermKeyEvent, Binding>,
}

impl KeyBindings {
    /// Look up the binding for a key event.
    ///
    /// Release events (reported by terminals with the kitty keyboard protocol) are
    /// never bound, so a key press is not applied twice.
    pub fn get(&self, key: TermKeyEvent) -> Option<Binding> {
        if key.kind == KeyEventKind::Release {
            return None;
        }

        let normalized = TermKeyEvent::new(key.code, key.modifiers);
        if let Some(binding) = self.bindings.get(&normalized) {
            return Some(*binding);
        }

        match key.code {
            KeyCode::Char(ch)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                Some(Binding::Key(KeyEvent::Printable(ch)))
            }
            _ => None,
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = HashMap::new();

        // Editing
        bindings.insert(
            TermKeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE),
            Binding::Key(KeyEvent::Backspace),
        );
        bindings.insert(
            TermKeyEvent::new(KeyCode::Enter, KeyModifiers::NONE),
            Binding::Key(KeyEvent::Enter),
        );

        // Cursor
        bindings.insert(
            TermKeyEvent::new(KeyCode::Left, KeyModifiers::NONE),
            Binding::Key(KeyEvent::Left),
        );
        bindings.insert(
            TermKeyEvent::new(KeyCode::Right, KeyModifiers::NONE),
            Binding::Key(KeyEvent::Right),
        );

        // History scrolling
        bindings.insert(
            TermKeyEvent::new(KeyCode::Up, KeyModifiers::NONE),
            Binding::Key(KeyEvent::Up),
        );
        bindings.insert(
            TermKeyEvent::new(KeyCode::Down, KeyModifiers::NONE),
            Binding::Key(KeyEvent::Down),
        );

        // Application
        bindings.insert(
            TermKeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Binding::Interrupt,
        );

        Self { bindings }
    }
}
