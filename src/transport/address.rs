//! Parsing of the operator-entered `host:port` string.

use crate::model::AddressError;
use std::io;
use std::net::{SocketAddr, ToSocketAddrs};

/// A `host:port` pair as typed at the connect prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerAddress {
    host: String,
    port: u16,
}

impl ServerAddress {
    /// Parse `host:port`. The last `:` separates the port, so bracketed IPv6
    /// literals such as `[::1]:4000` work; the brackets are stripped from the host.
    pub fn parse(input: &str) -> Result<Self, AddressError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(AddressError::Empty);
        }

        let (host, port) = input
            .rsplit_once(':')
            .ok_or_else(|| AddressError::MissingPort(input.to_string()))?;

        let host = host
            .strip_prefix('[')
            .and_then(|h| h.strip_suffix(']'))
            .unwrap_or(host);
        if host.is_empty() {
            return Err(AddressError::MissingHost(input.to_string()));
        }

        let port = port.parse::<u16>().map_err(|_| AddressError::InvalidPort {
            input: input.to_string(),
            port: port.to_string(),
        })?;

        Ok(Self {
            host: host.to_string(),
            port,
        })
    }

    /// Host part, without IPv6 brackets.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Port part.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Resolve to the first socket address the system resolver returns.
    pub fn resolve(&self) -> Result<SocketAddr, AddressError> {
        let unresolvable = |source| AddressError::Unresolvable {
            address: self.to_string(),
            source,
        };

        (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(unresolvable)?
            .next()
            .ok_or_else(|| {
                unresolvable(io::Error::new(
                    io::ErrorKind::NotFound,
                    "no addresses found",
                ))
            })
    }
}

impl std::fmt::Display for ServerAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}
