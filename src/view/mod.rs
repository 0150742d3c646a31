//! TUI rendering and terminal management (impure shell)

mod chat_pane;
mod input_pane;
mod layout;

pub use chat_pane::ChatPane;
pub use input_pane::{cursor_column, input_viewport, InputPane};
pub use layout::{render_layout, INPUT_HEIGHT};

use crate::state::{InputLine, ScrollWindow};
use crossterm::{
    cursor::Show,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::Backend, Terminal};
use std::io;
use tracing::warn;

/// Everything a frame shows.
#[derive(Debug, Clone, Copy)]
pub struct ScreenContent<'a> {
    /// Prompt text shown above the messages (used before the chat starts).
    pub notices: &'a [String],
    /// Messages, oldest first.
    pub window: &'a ScrollWindow,
    /// The line being typed.
    pub input: &'a InputLine,
}

/// Something the session can draw on.
///
/// `render` repaints the whole screen: the message region top to bottom, then the
/// input region, then flushes.
pub trait DisplaySurface {
    /// Draw `content` as one full frame.
    fn render(&mut self, content: &ScreenContent<'_>) -> io::Result<()>;
}

/// ratatui-backed display surface.
///
/// Generic over backend to support testing with `TestBackend`.
pub struct Screen<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
}

impl<B> Screen<B>
where
    B: Backend,
{
    /// Wrap `backend` in a ratatui terminal.
    pub fn new(backend: B) -> io::Result<Self> {
        Ok(Self {
            terminal: Terminal::new(backend)?,
        })
    }

    /// The terminal, for reading back the drawn buffer.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

impl<B> DisplaySurface for Screen<B>
where
    B: Backend,
{
    fn render(&mut self, content: &ScreenContent<'_>) -> io::Result<()> {
        self.terminal.draw(|frame| render_layout(frame, content))?;
        Ok(())
    }
}

/// Raw mode plus alternate screen for as long as the guard lives.
///
/// Dropping the guard restores the terminal, on every exit path.
#[derive(Debug)]
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    /// Enable raw mode and switch to the alternate screen.
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        if let Err(err) = io::stdout().execute(EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(err);
        }
        Ok(Self { _private: () })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(err) = restore_terminal() {
            warn!(error = %err, "Failed to restore terminal");
        }
    }
}

/// Restore terminal to normal state
///
/// Disables raw mode, leaves alternate screen, shows the cursor
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    io::stdout().execute(Show)?;
    Ok(())
}
