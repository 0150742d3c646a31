//! Background loop: server lines in, window updates and repaints out.

use super::shared::{lock, SharedSession};
use crate::model::AppError;
use crate::protocol;
use crate::transport::LineReceiver;
use crate::view::DisplaySurface;
use std::io::Read;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tracing::{debug, error};

/// Receive until the connection ends.
///
/// Any receive or repaint failure raises `stop` and calls `close` so the input
/// loop winds down too. If `stop` was already raised (the user left), the failure
/// is the expected result of closing the socket and the loop returns `Ok`.
///
/// # Errors
///
/// The first transport or terminal error seen while the session was live.
pub fn run<D, R>(
    shared: &Mutex<SharedSession<D>>,
    receiver: &mut LineReceiver<R>,
    stop: &AtomicBool,
    close: impl FnOnce(),
) -> Result<(), AppError>
where
    D: DisplaySurface,
    R: Read,
{
    let result = receive_until_failure(shared, receiver);

    let already_stopping = stop.swap(true, Ordering::SeqCst);
    close();

    match result {
        Err(err) if already_stopping => {
            debug!(error = %err, "Receive ended after local stop");
            Ok(())
        }
        Err(err) => {
            error!(error = %err, "Receive failed");
            Err(err)
        }
        Ok(never) => match never {},
    }
}

fn receive_until_failure<D, R>(
    shared: &Mutex<SharedSession<D>>,
    receiver: &mut LineReceiver<R>,
) -> Result<std::convert::Infallible, AppError>
where
    D: DisplaySurface,
    R: Read,
{
    loop {
        let line = receiver.recv_line()?;
        let inbound = protocol::decode(&line);
        lock(shared).receive(inbound)?;
    }
}
