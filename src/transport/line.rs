//! Line framing over a byte stream.
//!
//! Every line in both directions ends with `\n`. The receiver buffers until a
//! terminator arrives, so a message split across TCP segments, or several
//! messages coalesced into one, still come out one line per call.

use crate::codec;
use crate::model::TransportError;
use crate::protocol::Outbound;
use std::io::{self, BufRead, BufReader, Read, Write};
use tracing::{debug, warn};

/// Longest inbound line accepted, terminator included.
pub const MAX_LINE_LEN: u64 = 64 * 1024;

/// Writes one protocol line per call.
pub struct LineSender<W: Write> {
    writer: W,
}

impl<W: Write> LineSender<W> {
    /// Sender writing to `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write `intent` as one `\n`-terminated line and flush.
    pub fn send(&mut self, intent: &Outbound) -> Result<(), TransportError> {
        let line = intent.to_wire();
        debug!(line = %line, "Sending line");

        let mut bytes = codec::encode(&line);
        bytes.push(b'\n');
        self.writer
            .write_all(&bytes)
            .and_then(|()| self.writer.flush())
            .map_err(TransportError::Send)
    }

    /// The underlying writer.
    #[cfg(test)]
    pub fn get_ref(&self) -> &W {
        &self.writer
    }
}

/// Reads one protocol line per call.
pub struct LineReceiver<R: Read> {
    reader: BufReader<R>,
    buf: Vec<u8>,
}

impl<R: Read> LineReceiver<R> {
    /// Receiver reading from `reader`, buffered.
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            buf: Vec::new(),
        }
    }

    /// Block until a full line is available.
    ///
    /// Strips the `\n` (and a preceding `\r`). An unterminated fragment right before
    /// EOF is returned as a line; once nothing is left, returns
    /// `TransportError::Closed`.
    ///
    /// # Errors
    ///
    /// `Receive` for I/O errors and for lines longer than [`MAX_LINE_LEN`],
    /// `Closed` when the peer has hung up.
    pub fn recv_line(&mut self) -> Result<String, TransportError> {
        self.buf.clear();
        let read = (&mut self.reader)
            .take(MAX_LINE_LEN)
            .read_until(b'\n', &mut self.buf)
            .map_err(TransportError::Receive)?;

        if read == 0 {
            return Err(TransportError::Closed);
        }

        if read as u64 == MAX_LINE_LEN && self.buf.last() != Some(&b'\n') {
            warn!(limit = MAX_LINE_LEN, "Inbound line too long");
            return Err(TransportError::Receive(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("line longer than {MAX_LINE_LEN} bytes"),
            )));
        }

        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        }

        let line = codec::decode(&self.buf);
        debug!(line = %line, "Received line");
        Ok(line)
    }
}
