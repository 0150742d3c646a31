//! State shared by the input and receive threads.

use crate::integration;
use crate::model::{KeyEvent, MessageIndex};
use crate::protocol::Inbound;
use crate::state::{line_editor, EditResult, InputLine, ScrollWindow};
use crate::view::{DisplaySurface, ScreenContent};
use std::io;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Window, input line, and display behind one lock.
///
/// Every window change and every repaint happens while holding the lock, so the
/// screen never shows a half-applied update.
#[derive(Debug)]
pub struct SharedSession<D> {
    window: ScrollWindow,
    input: InputLine,
    notices: Vec<String>,
    display: D,
}

/// What one key did to the input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// Still editing; the line changed or the key was a no-op.
    Editing,
    /// Enter; carries the finished text.
    Submitted(String),
    /// Up arrow; carries the head index, if any.
    ScrollUp(Option<MessageIndex>),
    /// Down arrow; carries the tail index, if any.
    ScrollDown(Option<MessageIndex>),
}

impl<D> SharedSession<D>
where
    D: DisplaySurface,
{
    /// Empty window of `history_capacity` messages and an empty input line.
    pub fn new(display: D, history_capacity: usize) -> Self {
        Self {
            window: ScrollWindow::with_capacity(history_capacity),
            input: InputLine::new(),
            notices: Vec::new(),
            display,
        }
    }

    /// Messages currently on screen.
    #[cfg(test)]
    pub fn window(&self) -> &ScrollWindow {
        &self.window
    }

    /// Line being edited.
    #[cfg(test)]
    pub fn input(&self) -> &InputLine {
        &self.input
    }

    /// The display surface.
    #[cfg(test)]
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Add a line shown above the messages, such as a prompt.
    pub fn push_notice(&mut self, notice: impl Into<String>) {
        self.notices.push(notice.into());
    }

    /// Drop all notices.
    pub fn clear_notices(&mut self) {
        self.notices.clear();
    }

    /// Repaint everything.
    pub fn redraw(&mut self) -> io::Result<()> {
        let content = ScreenContent {
            notices: &self.notices,
            window: &self.window,
            input: &self.input,
        };
        self.display.render(&content)
    }

    /// Feed one key to the line editor.
    ///
    /// Anything but a plain edit ends the cycle and leaves an empty line behind.
    pub fn edit(&mut self, key: KeyEvent) -> Edit {
        match line_editor::apply(std::mem::take(&mut self.input), key) {
            EditResult::StillEditing(line) => {
                self.input = line;
                Edit::Editing
            }
            EditResult::Submitted(text) => Edit::Submitted(text),
            EditResult::ScrollUpRequested => Edit::ScrollUp(self.window.oldest_index()),
            EditResult::ScrollDownRequested => Edit::ScrollDown(self.window.newest_index()),
        }
    }

    /// Apply a server event and repaint if the window changed.
    pub fn receive(&mut self, inbound: Inbound) -> io::Result<bool> {
        let changed = integration::apply_inbound(&mut self.window, inbound);
        if changed {
            self.redraw()?;
        }
        Ok(changed)
    }
}

/// Lock the session, recovering the data if a thread panicked while holding it.
pub fn lock<D>(shared: &Mutex<SharedSession<D>>) -> MutexGuard<'_, SharedSession<D>> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}
