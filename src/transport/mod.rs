//! Stream-socket transport.
//!
//! - [`ServerAddress`]: parse and resolve the `host:port` typed by the operator
//! - [`Connection`]: one TCP connection, shut down when dropped
//! - [`LineSender`] / [`LineReceiver`]: `\n`-framed lines over either half
//!
//! Send and receive run on separate clones of the socket, so the receive thread can
//! block in `read` while the input thread writes.

use crate::model::{AppError, TransportError};
use std::net::{Shutdown, SocketAddr, TcpStream};
use tracing::{debug, info};

pub mod address;
pub mod line;

pub use address::ServerAddress;
pub use line::{LineReceiver, LineSender};

/// An open connection to the chat server.
///
/// Dropping it shuts the socket down in both directions, which also wakes any
/// thread blocked in `recv` on a clone.
#[derive(Debug)]
pub struct Connection {
    stream: TcpStream,
    peer: SocketAddr,
}

impl Connection {
    /// Parse, resolve, and connect (blocking, no timeout).
    ///
    /// # Errors
    ///
    /// `AppError::Address` for unusable input, `AppError::Transport` if the
    /// connect itself fails.
    pub fn open(input: &str) -> Result<Self, AppError> {
        let address = ServerAddress::parse(input)?;
        let peer = address.resolve()?;
        info!(host = address.host(), port = address.port(), %peer, "Connecting");
        Ok(Self::connect(peer)?)
    }

    /// Connect to an already resolved address.
    pub fn connect(peer: SocketAddr) -> Result<Self, TransportError> {
        let stream = TcpStream::connect(peer).map_err(|source| TransportError::Connect {
            address: peer,
            source,
        })?;
        Ok(Self { stream, peer })
    }

    /// The resolved address this connection went to.
    pub fn peer(&self) -> SocketAddr {
        self.peer
    }

    /// Writer half.
    pub fn sender(&self) -> Result<LineSender<TcpStream>, TransportError> {
        Ok(LineSender::new(self.clone_stream()?))
    }

    /// Reader half.
    pub fn receiver(&self) -> Result<LineReceiver<TcpStream>, TransportError> {
        Ok(LineReceiver::new(self.clone_stream()?))
    }

    /// A handle that can close the connection from another thread.
    pub fn closer(&self) -> Result<Closer, TransportError> {
        Ok(Closer(self.clone_stream()?))
    }

    fn clone_stream(&self) -> Result<TcpStream, TransportError> {
        // try_clone only fails on descriptor exhaustion; report it as a send-side fault.
        self.stream.try_clone().map_err(TransportError::Send)
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        close_stream(&self.stream);
    }
}

/// Closes the shared socket; every clone observes it.
#[derive(Debug)]
pub struct Closer(TcpStream);

impl Closer {
    /// Shut the socket down in both directions. Idempotent.
    pub fn close(&self) {
        close_stream(&self.0);
    }
}

fn close_stream(stream: &TcpStream) {
    // NotConnected after an earlier shutdown or a peer reset is expected.
    if let Err(err) = stream.shutdown(Shutdown::Both) {
        debug!(error = %err, "Socket shutdown");
    }
}
