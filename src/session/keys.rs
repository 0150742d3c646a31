//! Key sources for the session loops.
//!
//! The loops never block on the terminal indefinitely: every source returns
//! [`Input::Idle`] after its poll interval so the caller can check for termination.

use crate::config::{Binding, KeyBindings};
use crate::model::KeyEvent;
use crossterm::event::{self, Event};
use std::io;
use std::time::Duration;

/// One step of terminal input, already mapped through the key bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// A key for the line editor.
    Key(KeyEvent),
    /// Ctrl+C.
    Interrupt,
    /// The terminal changed size; repaint.
    Resize,
    /// Nothing happened within the poll interval, or the event is unbound.
    Idle,
}

/// Where the session loops get their input from.
///
/// Production reads the terminal ([`CrosstermKeys`]); tests substitute scripted
/// sources.
pub trait KeySource {
    /// Wait up to one poll interval for the next input.
    fn next_input(&mut self) -> io::Result<Input>;
}

/// Reads the real terminal through crossterm.
#[derive(Debug)]
pub struct CrosstermKeys {
    bindings: KeyBindings,
    poll_interval: Duration,
}

impl CrosstermKeys {
    /// Source that waits at most `poll_interval` per call.
    pub fn new(bindings: KeyBindings, poll_interval: Duration) -> Self {
        Self {
            bindings,
            poll_interval,
        }
    }

    fn translate(&self, event: Event) -> Input {
        match event {
            Event::Key(key) => match self.bindings.get(key) {
                Some(Binding::Key(key)) => Input::Key(key),
                Some(Binding::Interrupt) => Input::Interrupt,
                None => Input::Idle,
            },
            Event::Resize(_, _) => Input::Resize,
            _ => Input::Idle,
        }
    }
}

impl KeySource for CrosstermKeys {
    fn next_input(&mut self) -> io::Result<Input> {
        if !event::poll(self.poll_interval)? {
            return Ok(Input::Idle);
        }
        Ok(self.translate(event::read()?))
    }
}
