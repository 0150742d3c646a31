//! Session coordinator.
//!
//! Walks the session through its phases: ask for the server, connect, ask for a
//! name, register, then chat on two threads until either side ends it.
//!
//! The input loop runs on the calling thread. The receive loop runs on a thread
//! named `receive`. Both share one [`SharedSession`] behind a mutex and one stop
//! flag.

pub mod input_loop;
pub mod keys;
pub mod prompt;
pub mod receive_loop;
pub mod shared;

pub use input_loop::LoopExit;
pub use keys::{CrosstermKeys, Input, KeySource};
pub use shared::SharedSession;

use crate::config::ResolvedConfig;
use crate::model::{AppError, TransportError};
use crate::protocol::Outbound;
use crate::transport::Connection;
use crate::view::DisplaySurface;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use tracing::{error, info, warn};

/// First prompt, asking where to connect.
pub const ADDRESS_PROMPT: &str = "Enter chat server IP and port separated by ':'";

/// Session lifecycle. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing opened yet.
    Disconnected,
    /// Asking for the address and connecting.
    Connecting,
    /// Socket open, asking for the name.
    Connected,
    /// `/register` sent.
    Registered,
    /// Both loops running.
    Active,
    /// Socket closed; no way back.
    Terminated,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Disconnected => "disconnected",
            Phase::Connecting => "connecting",
            Phase::Connected => "connected",
            Phase::Registered => "registered",
            Phase::Active => "active",
            Phase::Terminated => "terminated",
        };
        f.write_str(name)
    }
}

/// How a session that did not fail came to an end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// `/exit` was sent.
    Exited,
    /// Ctrl+C at a startup prompt; nothing was sent.
    Interrupted,
}

struct PhaseTracker(Phase);

impl PhaseTracker {
    fn advance(&mut self, next: Phase) {
        info!(from = %self.0, to = %next, "Session phase");
        self.0 = next;
    }
}

/// Second prompt, showing the suggested name length.
pub fn name_prompt(max_name_len: usize) -> String {
    format!("Enter your name ({max_name_len} symbols):")
}

/// Run one chat session to completion.
///
/// `display` moves into the shared state so the receive thread can repaint it.
///
/// # Errors
///
/// Address, connect, send, receive, and terminal failures. All are fatal.
pub fn run<D, K>(
    config: &ResolvedConfig,
    display: D,
    keys: &mut K,
) -> Result<Termination, AppError>
where
    D: DisplaySurface + Send + 'static,
    K: KeySource,
{
    let mut phase = PhaseTracker(Phase::Disconnected);
    let shared = Arc::new(Mutex::new(SharedSession::new(
        display,
        config.history_capacity,
    )));
    shared::lock(&shared).redraw()?;

    phase.advance(Phase::Connecting);
    let Some(address) = prompt::read_submission(&shared, keys, ADDRESS_PROMPT)? else {
        info!("Interrupted at address prompt");
        phase.advance(Phase::Terminated);
        return Ok(Termination::Interrupted);
    };
    let connection = Connection::open(&address)?;
    info!(peer = %connection.peer(), "Connected");
    phase.advance(Phase::Connected);

    let Some(name) = prompt::read_submission(&shared, keys, &name_prompt(config.max_name_len))?
    else {
        info!("Interrupted at name prompt");
        phase.advance(Phase::Terminated);
        return Ok(Termination::Interrupted);
    };
    let name_len = name.chars().count();
    if name_len > config.max_name_len {
        warn!(
            name_len,
            max = config.max_name_len,
            "Name longer than suggested"
        );
    }

    let mut sender = connection.sender()?;
    sender.send(&Outbound::Register(name))?;
    phase.advance(Phase::Registered);

    {
        let mut session = shared::lock(&shared);
        session.clear_notices();
        session.redraw()?;
    }

    let stop = Arc::new(AtomicBool::new(false));
    let receive_handle = {
        let shared = Arc::clone(&shared);
        let stop = Arc::clone(&stop);
        let mut receiver = connection.receiver()?;
        let closer = connection.closer()?;
        thread::Builder::new()
            .name("receive".to_string())
            .spawn(move || {
                receive_loop::run(&shared, &mut receiver, &stop, || closer.close())
            })?
    };
    phase.advance(Phase::Active);

    let input_result = input_loop::run(&shared, keys, &mut sender, &stop);

    stop.store(true, Ordering::SeqCst);
    drop(connection);
    let receive_result = receive_handle.join().unwrap_or_else(|_| {
        error!("Receive thread panicked");
        Err(TransportError::Closed.into())
    });
    phase.advance(Phase::Terminated);

    match (input_result, receive_result) {
        (Ok(LoopExit::UserExit), receive) => {
            if let Err(err) = receive {
                warn!(error = %err, "Receive error after exit");
            }
            info!("Left chat");
            Ok(Termination::Exited)
        }
        (Ok(LoopExit::Stopped), Err(err)) | (Err(_), Err(err)) => Err(err),
        (Err(err), Ok(())) => Err(err),
        (Ok(LoopExit::Stopped), Ok(())) => {
            // Only the receive side raises the flag without /exit, and it always
            // reports an error when it does.
            warn!("Session stopped without a cause");
            Err(TransportError::Closed.into())
        }
    }
}
