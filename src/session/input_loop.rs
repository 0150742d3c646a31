//! Foreground loop: keys in, wire lines out.

use super::keys::{Input, KeySource};
use super::shared::{lock, Edit, SharedSession};
use crate::model::AppError;
use crate::protocol::Outbound;
use crate::transport::LineSender;
use crate::view::DisplaySurface;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tracing::{debug, info};

/// Why the input loop stopped without an error of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// `/exit` was sent (typed or Ctrl+C).
    UserExit,
    /// The receive side set the stop flag.
    Stopped,
}

/// Run until the user exits or `stop` is raised elsewhere.
///
/// On exit the stop flag is raised before `/exit` goes out, so the receive thread
/// treats the server hanging up as expected.
///
/// # Errors
///
/// A failed send or repaint.
pub fn run<D, K, W>(
    shared: &Mutex<SharedSession<D>>,
    keys: &mut K,
    sender: &mut LineSender<W>,
    stop: &AtomicBool,
) -> Result<LoopExit, AppError>
where
    D: DisplaySurface,
    K: KeySource,
    W: Write,
{
    loop {
        if stop.load(Ordering::SeqCst) {
            debug!("Stop flag observed");
            return Ok(LoopExit::Stopped);
        }

        let outbound = match keys.next_input()? {
            Input::Key(key) => {
                let mut session = lock(shared);
                let edit = session.edit(key);
                session.redraw()?;
                match edit {
                    Edit::Editing => None,
                    Edit::Submitted(text) => Outbound::from_submitted(text),
                    Edit::ScrollUp(head) => head.map(Outbound::ScrollUp),
                    Edit::ScrollDown(tail) => tail.map(Outbound::ScrollDown),
                }
            }
            Input::Interrupt => {
                info!("Interrupted, leaving chat");
                Some(Outbound::Exit)
            }
            Input::Resize => {
                lock(shared).redraw()?;
                None
            }
            Input::Idle => None,
        };

        let Some(outbound) = outbound else {
            continue;
        };

        if outbound.is_exit() {
            stop.store(true, Ordering::SeqCst);
            sender.send(&outbound)?;
            return Ok(LoopExit::UserExit);
        }
        sender.send(&outbound)?;
    }
}
