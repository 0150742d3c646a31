//! Wire protocol: inbound line decoding and outbound line encoding.
//!
//! Commands start with `/`. Client → server: `/register`, `/exit`, `/scroll_up`,
//! `/scroll_down`, or free text. Server → client: `"<index> <body>"` chat lines and
//! `/scroll_up` / `/scroll_down` followed by an `"<index> <body>"` payload.

use crate::model::{IndexedMessage, MessageIndex, MessageParseError};
use std::fmt;

/// Announces the display name; first line after connecting.
pub const REGISTER: &str = "/register";
/// Leave the chat.
pub const EXIT: &str = "/exit";
/// Older history: request when sent, payload prefix when received.
pub const SCROLL_UP: &str = "/scroll_up";
/// Newer history: request when sent, payload prefix when received.
pub const SCROLL_DOWN: &str = "/scroll_down";

// ===== Outbound =====

/// A client intent, ready to be written as one wire line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    /// Announce the display name.
    Register(String),
    /// Chat text, sent verbatim.
    Plain(String),
    /// Graceful disconnect.
    Exit,
    /// Ask for the message preceding this index.
    ScrollUp(MessageIndex),
    /// Ask for the message following this index.
    ScrollDown(MessageIndex),
}

impl Outbound {
    /// Classify a line submitted from the editor.
    ///
    /// `/exit` (surrounding whitespace ignored) is the exit command; everything else,
    /// including other `/`-prefixed text, goes out verbatim. Empty lines yield `None`.
    pub fn from_submitted(text: String) -> Option<Self> {
        if text.is_empty() {
            return None;
        }
        if text.trim() == EXIT {
            return Some(Outbound::Exit);
        }
        Some(Outbound::Plain(text))
    }

    /// Wire text of this intent, without the line terminator.
    pub fn to_wire(&self) -> String {
        match self {
            Outbound::Register(name) => format!("{REGISTER} {name}"),
            Outbound::Plain(text) => text.clone(),
            Outbound::Exit => EXIT.to_string(),
            Outbound::ScrollUp(index) => format!("{SCROLL_UP} {index}"),
            Outbound::ScrollDown(index) => format!("{SCROLL_DOWN} {index}"),
        }
    }

    /// True for the intent that ends the session.
    pub fn is_exit(&self) -> bool {
        matches!(self, Outbound::Exit)
    }
}

// ===== Inbound =====

/// A decoded server line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// Live chat message for the window tail.
    Chat(IndexedMessage),
    /// Older message to splice in at the head.
    ScrollUp(IndexedMessage),
    /// Newer message to splice in at the tail.
    ScrollDown(IndexedMessage),
    /// Nothing to apply. Not an error: the session continues.
    Ignored(IgnoreReason),
}

/// Why an inbound line was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The line was empty.
    Empty,
    /// A `/command` this client does not know. Kept for forward compatibility.
    UnknownCommand(String),
    /// The `"<index> <body>"` payload did not parse.
    Malformed(MessageParseError),
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IgnoreReason::Empty => write!(f, "empty line"),
            IgnoreReason::UnknownCommand(command) => write!(f, "unknown command {command}"),
            IgnoreReason::Malformed(err) => write!(f, "malformed message: {err}"),
        }
    }
}

/// Decode one inbound line (terminator already stripped).
pub fn decode(line: &str) -> Inbound {
    if line.is_empty() {
        return Inbound::Ignored(IgnoreReason::Empty);
    }

    if line.starts_with('/') {
        let (command, arguments) = line.split_once(' ').unwrap_or((line, ""));
        let wrap: fn(IndexedMessage) -> Inbound = match command {
            SCROLL_UP => Inbound::ScrollUp,
            SCROLL_DOWN => Inbound::ScrollDown,
            other => return Inbound::Ignored(IgnoreReason::UnknownCommand(other.to_string())),
        };
        return match IndexedMessage::parse(arguments) {
            Ok(message) => wrap(message),
            Err(err) => Inbound::Ignored(IgnoreReason::Malformed(err)),
        };
    }

    match IndexedMessage::parse(line) {
        Ok(message) => Inbound::Chat(message),
        Err(err) => Inbound::Ignored(IgnoreReason::Malformed(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== Outbound::to_wire =====

    #[test]
    fn register_line() {
        assert_eq!(
            Outbound::Register("Alice".to_string()).to_wire(),
            "/register Alice"
        );
    }

    #[test]
    fn plain_line_is_verbatim() {
        assert_eq!(Outbound::Plain("hello".to_string()).to_wire(), "hello");
    }

    #[test]
    fn exit_line() {
        assert_eq!(Outbound::Exit.to_wire(), "/exit");
    }

    #[test]
    fn scroll_request_lines() {
        assert_eq!(Outbound::ScrollUp(10).to_wire(), "/scroll_up 10");
        assert_eq!(Outbound::ScrollDown(14).to_wire(), "/scroll_down 14");
    }

    // ===== Outbound::from_submitted =====

    #[test]
    fn submitted_exit_becomes_exit_intent() {
        assert_eq!(
            Outbound::from_submitted("/exit".to_string()),
            Some(Outbound::Exit)
        );
        assert_eq!(
            Outbound::from_submitted("  /exit ".to_string()),
            Some(Outbound::Exit)
        );
    }

    #[test]
    fn submitted_text_becomes_plain() {
        assert_eq!(
            Outbound::from_submitted("hello".to_string()),
            Some(Outbound::Plain("hello".to_string()))
        );
    }

    #[test]
    fn submitted_unknown_command_is_sent_verbatim() {
        assert_eq!(
            Outbound::from_submitted("/me waves".to_string()),
            Some(Outbound::Plain("/me waves".to_string()))
        );
    }

    #[test]
    fn submitted_empty_line_sends_nothing() {
        assert_eq!(Outbound::from_submitted(String::new()), None);
    }

    // ===== decode =====

    #[test]
    fn decode_chat_message() {
        assert_eq!(
            decode("7 hi there"),
            Inbound::Chat(IndexedMessage::new(7, "hi there"))
        );
    }

    #[test]
    fn decode_scroll_up() {
        assert_eq!(
            decode("/scroll_up 9 earlier msg"),
            Inbound::ScrollUp(IndexedMessage::new(9, "earlier msg"))
        );
    }

    #[test]
    fn decode_scroll_down() {
        assert_eq!(
            decode("/scroll_down 15 later"),
            Inbound::ScrollDown(IndexedMessage::new(15, "later"))
        );
    }

    #[test]
    fn decode_unknown_command_is_ignored() {
        assert_eq!(
            decode("/topic welcome all"),
            Inbound::Ignored(IgnoreReason::UnknownCommand("/topic".to_string()))
        );
    }

    #[test]
    fn decode_bare_unknown_command_is_ignored() {
        assert_eq!(
            decode("/ping"),
            Inbound::Ignored(IgnoreReason::UnknownCommand("/ping".to_string()))
        );
    }

    #[test]
    fn decode_empty_line_is_ignored() {
        assert_eq!(decode(""), Inbound::Ignored(IgnoreReason::Empty));
    }

    #[test]
    fn decode_scroll_without_payload_is_malformed() {
        assert_eq!(
            decode("/scroll_up"),
            Inbound::Ignored(IgnoreReason::Malformed(MessageParseError::Empty))
        );
    }

    #[test]
    fn decode_chat_without_index_is_malformed() {
        assert!(matches!(
            decode("hello there"),
            Inbound::Ignored(IgnoreReason::Malformed(MessageParseError::InvalidIndex(_)))
        ));
    }

    #[test]
    fn ignore_reason_display() {
        assert_eq!(
            IgnoreReason::UnknownCommand("/topic".to_string()).to_string(),
            "unknown command /topic"
        );
    }
}
