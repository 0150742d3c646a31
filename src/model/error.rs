//! Error types for the scrollchat client.
//!
//! This module defines the error taxonomy using `thiserror`. Errors compose via `?` and
//! `From` conversions up to [`AppError`], which `main` turns into an exit status.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error wrapping every fatal failure
//!   - [`AddressError`] - The operator typed something that is not a usable `host:port`
//!   - [`TransportError`] - Connect, send, or receive failed, or the peer hung up
//!   - [`crate::config::loader::ConfigError`] - Config file exists but is unreadable
//!   - [`crate::logging::LoggingError`] - Log file could not be set up
//!   - `std::io::Error` - Terminal/TUI rendering failures
//!
//! # Recovery Strategy
//!
//! There is none. Every variant of [`AppError`] ends the session: the transport is
//! closed, the terminal restored, and the message printed to stderr. Protocol anomalies
//! (unknown server commands, malformed lines) are NOT errors; see
//! [`crate::protocol::Inbound::Ignored`].

use std::net::SocketAddr;
use thiserror::Error;

/// Top-level application error encompassing all fatal failure modes.
///
/// # Examples
///
/// ```
/// use scrollchat::model::error::{AppError, TransportError};
///
/// let err: AppError = TransportError::Closed.into();
/// assert!(err.to_string().contains("closed the connection"));
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// The server address entered at the first prompt is unusable.
    #[error("Invalid server address: {0}")]
    Address(#[from] AddressError),

    /// Connecting to, sending to, or receiving from the server failed.
    ///
    /// Fatal and never retried; the wrapped error carries the OS description.
    #[error("Connection error: {0}")]
    Transport(#[from] TransportError),

    /// Configuration file exists but could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::loader::ConfigError),

    /// Log file setup failed.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// Terminal or TUI rendering error.
    ///
    /// Raised by the crossterm/ratatui layer (raw mode, alternate screen, draw).
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Reasons a `host:port` string cannot be turned into a socket address.
///
/// # Examples
///
/// ```
/// use scrollchat::model::error::AddressError;
///
/// let err = AddressError::MissingPort("localhost".to_string());
/// assert!(err.to_string().contains("localhost"));
/// ```
#[derive(Debug, Error)]
pub enum AddressError {
    /// Input was empty or whitespace.
    #[error("no address given")]
    Empty,

    /// No `:` separating host and port.
    #[error("missing ':<port>' in {0:?}")]
    MissingPort(String),

    /// Nothing before the `:`.
    #[error("missing host in {0:?}")]
    MissingHost(String),

    /// Port is not a number in `0..=65535`.
    #[error("invalid port {port:?} in {input:?}")]
    InvalidPort {
        /// Full text entered by the operator.
        input: String,
        /// The text after the last `:`.
        port: String,
    },

    /// Name lookup failed or produced no addresses.
    #[error("cannot resolve {address:?}: {source}")]
    Unresolvable {
        /// `host:port` as entered.
        address: String,
        /// Resolver error (or `NotFound` when the lookup returned nothing).
        #[source]
        source: std::io::Error,
    },
}

/// Failures of the stream-socket transport.
///
/// All variants are fatal for the session.
#[derive(Debug, Error)]
pub enum TransportError {
    /// `connect(2)` failed.
    #[error("failed to connect to {address}: {source}")]
    Connect {
        /// Resolved address the connect was attempted against.
        address: SocketAddr,
        /// OS error.
        #[source]
        source: std::io::Error,
    },

    /// Writing an outbound line failed.
    #[error("send failed: {0}")]
    Send(#[source] std::io::Error),

    /// Reading from the socket failed.
    #[error("receive failed: {0}")]
    Receive(#[source] std::io::Error),

    /// The peer closed the connection (read returned zero bytes).
    #[error("server closed the connection")]
    Closed,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn transport_error_converts_into_app_error() {
        let err: AppError = TransportError::Send(io::Error::other("broken pipe")).into();
        assert!(matches!(err, AppError::Transport(TransportError::Send(_))));
    }

    #[test]
    fn address_error_converts_into_app_error() {
        let err: AppError = AddressError::Empty.into();
        assert!(matches!(err, AppError::Address(AddressError::Empty)));
    }

    #[test]
    fn io_error_converts_into_terminal_variant() {
        let err: AppError = io::Error::other("tty gone").into();
        assert!(matches!(err, AppError::Terminal(_)));
    }

    #[test]
    fn connect_error_shows_os_description() {
        let err = TransportError::Connect {
            address: "127.0.0.1:9".parse().unwrap(),
            source: io::Error::new(io::ErrorKind::ConnectionRefused, "Connection refused"),
        };
        let msg = err.to_string();
        assert!(msg.contains("127.0.0.1:9"), "got: {msg}");
        assert!(msg.contains("Connection refused"), "got: {msg}");
    }

    #[test]
    fn invalid_port_names_offending_text() {
        let err = AddressError::InvalidPort {
            input: "host:http".to_string(),
            port: "http".to_string(),
        };
        assert!(err.to_string().contains("\"http\""));
    }
}
