// Newline-delimited message framing for the stdio transport

use bytes::BytesMut;
use tokio_util::codec::Decoder;

/// Longest accepted message line, in bytes.
pub const MAX_MESSAGE_LENGTH: usize = 8 * 1024 * 1024;

/// One line read from the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Incoming {
    Message(String),
    /// A line that is not UTF-8 or exceeds the length limit. It is consumed
    /// and reported so the reader can answer it and carry on.
    Malformed(&'static str),
}

/// Splits input on `\n` without ever failing on line content, unlike
/// `LinesCodec`, whose errors end the framed stream.
#[derive(Debug)]
pub struct MessageCodec {
    max_length: usize,
    discarding: bool,
    next_index: usize,
}

impl MessageCodec {
    pub fn new() -> Self {
        Self::with_max_length(MAX_MESSAGE_LENGTH)
    }

    pub fn with_max_length(max_length: usize) -> Self {
        Self {
            max_length,
            discarding: false,
            next_index: 0,
        }
    }

    fn frame(&mut self, line: &[u8]) -> Incoming {
        if std::mem::take(&mut self.discarding) {
            return Incoming::Malformed("message exceeds maximum length");
        }
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        match std::str::from_utf8(line) {
            Ok(text) => Incoming::Message(text.to_string()),
            Err(_) => Incoming::Malformed("message is not valid UTF-8"),
        }
    }
}

impl Default for MessageCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for MessageCodec {
    type Item = Incoming;
    type Error = std::io::Error;

    fn decode(&mut self, buf: &mut BytesMut) -> Result<Option<Incoming>, std::io::Error> {
        let newline = buf[self.next_index..]
            .iter()
            .position(|b| *b == b'\n')
            .map(|offset| self.next_index + offset);

        match newline {
            Some(index) => {
                self.next_index = 0;
                let line = buf.split_to(index + 1);
                Ok(Some(self.frame(&line[..index])))
            }
            None if buf.len() > self.max_length => {
                // Drop the oversized prefix; the rest of the line is dropped
                // when its newline arrives.
                buf.clear();
                self.next_index = 0;
                self.discarding = true;
                Ok(None)
            }
            None => {
                self.next_index = buf.len();
                Ok(None)
            }
        }
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<Incoming>, std::io::Error> {
        if let Some(frame) = self.decode(buf)? {
            return Ok(Some(frame));
        }
        self.next_index = 0;
        if buf.is_empty() {
            if std::mem::take(&mut self.discarding) {
                return Ok(Some(Incoming::Malformed("message exceeds maximum length")));
            }
            return Ok(None);
        }
        let line = buf.split_to(buf.len());
        Ok(Some(self.frame(&line)))
    }
}
