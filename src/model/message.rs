//! Server-indexed chat messages.

use std::fmt;
use thiserror::Error;

/// Position of a message in the server's log. Monotonic per log.
pub type MessageIndex = u64;

/// One line of the remote chat log, tagged with its log position.
///
/// Wire form is `"<index> <body>"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedMessage {
    index: MessageIndex,
    body: String,
}

/// Why a `"<index> <body>"` payload could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageParseError {
    /// Payload was empty.
    #[error("empty message")]
    Empty,

    /// The first word is not an unsigned integer.
    #[error("invalid message index {0:?}")]
    InvalidIndex(String),
}

impl IndexedMessage {
    /// Message with an already known index.
    pub fn new(index: MessageIndex, body: impl Into<String>) -> Self {
        Self {
            index,
            body: body.into(),
        }
    }

    /// Parse the `"<index> <body>"` wire form.
    ///
    /// The index ends at the first space; everything after that space is the body,
    /// verbatim. A payload with no space is an index with an empty body.
    pub fn parse(raw: &str) -> Result<Self, MessageParseError> {
        if raw.is_empty() {
            return Err(MessageParseError::Empty);
        }

        let (index, body) = raw.split_once(' ').unwrap_or((raw, ""));
        let index = index
            .parse::<MessageIndex>()
            .map_err(|_| MessageParseError::InvalidIndex(index.to_string()))?;

        Ok(Self::new(index, body))
    }

    /// Server-assigned position in the log.
    pub fn index(&self) -> MessageIndex {
        self.index
    }

    /// Text after the index, verbatim.
    pub fn body(&self) -> &str {
        &self.body
    }
}

impl fmt::Display for IndexedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.index, self.body)
    }
}
