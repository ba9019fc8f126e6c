//! Line-oriented reader for the request line and header block.
//!
//! Bytes are pulled from a non-blocking source into a read-ahead buffer and
//! handed out one line at a time. Terminator rules:
//!
//! - `\n` ends a line.
//! - `\r\n` ends a line.
//! - `\r` followed by any other byte ends the line early. The `\r` is
//!   dropped and the following byte starts the next line.
//! - `\r` as the very last byte before end-of-stream ends the line.
//!
//! A `\r` that is the last buffered byte while the peer is still open cannot
//! be classified yet, so the reader waits for more data instead of guessing.

use std::io::{self, Read};

use bytes::{Bytes, BytesMut};

/// Default upper bound on a line, terminator slot included.
pub const DEFAULT_MAX_LINE: usize = 1024;

const READ_CHUNK: usize = 4096;

/// Outcome of [`LineReader::read_line`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineRead {
    /// A complete line, terminator stripped.
    Line(Bytes),
    /// The peer shut down its side. Carries whatever unterminated bytes were
    /// left (possibly none).
    Closed(Bytes),
    /// The source has no more data right now; retry on the next readiness event.
    Pending,
}

#[derive(Debug)]
pub struct LineReader {
    buffer: BytesMut,
    max_line: usize,
    eof: bool,
}

impl Default for LineReader {
    fn default() -> Self {
        Self::new()
    }
}

impl LineReader {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_MAX_LINE)
    }

    /// Lines longer than `max_line - 1` bytes are split; the remainder is
    /// returned by the following call.
    pub fn with_limit(max_line: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(READ_CHUNK),
            max_line: max_line.max(2),
            eof: false,
        }
    }

    /// Returns `true` once the source has reported end-of-stream.
    pub fn is_eof(&self) -> bool {
        self.eof
    }

    /// Bytes read from the source but not yet returned as a line.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Reads the next line from `src`, draining it until a line is complete,
    /// the peer closes, or the source would block.
    pub fn read_line<R: Read>(&mut self, src: &mut R) -> io::Result<LineRead> {
        loop {
            if let Some(line) = self.take_line() {
                return Ok(LineRead::Line(line));
            }

            if self.eof {
                return Ok(LineRead::Closed(self.buffer.split().freeze()));
            }

            let mut chunk = [0u8; READ_CHUNK];
            match src.read(&mut chunk) {
                Ok(0) => self.eof = true,
                Ok(n) => self.buffer.extend_from_slice(&chunk[..n]),
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => return Ok(LineRead::Pending),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    fn take_line(&mut self) -> Option<Bytes> {
        let limit = self.max_line - 1;
        let scan = self.buffer.len().min(limit);

        for i in 0..scan {
            match self.buffer[i] {
                b'\n' => return Some(self.split_line(i, i + 1)),
                b'\r' => {
                    return match self.buffer.get(i + 1).copied() {
                        Some(b'\n') => Some(self.split_line(i, i + 2)),
                        Some(_) => Some(self.split_line(i, i + 1)),
                        None if self.eof => Some(self.split_line(i, i + 1)),
                        None => None,
                    };
                }
                _ => {}
            }
        }

        if self.buffer.len() >= limit {
            return Some(self.split_line(limit, limit));
        }

        None
    }

    fn split_line(&mut self, end: usize, consumed: usize) -> Bytes {
        let mut line = self.buffer.split_to(consumed);
        line.truncate(end);
        line.freeze()
    }
}
