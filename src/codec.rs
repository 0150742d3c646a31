//! Conversion between wire bytes and in-memory text.
//!
//! The wire encoding is UTF-8. The editor works on `char` sequences so that cursor
//! arithmetic counts characters, not bytes; message bodies are kept as `String`.
//! Decoding is lossy: invalid sequences become U+FFFD instead of failing the session.

/// Decode one wire line into text.
pub fn decode(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Encode text for the wire.
pub fn encode(text: &str) -> Vec<u8> {
    text.as_bytes().to_vec()
}

/// Split text into the editor's character representation.
pub fn to_wide(text: &str) -> Vec<char> {
    text.chars().collect()
}

/// Join editor characters back into text.
pub fn from_wide(chars: &[char]) -> String {
    chars.iter().collect()
}
