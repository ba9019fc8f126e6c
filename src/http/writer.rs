use std::io::{self, Write};

use crate::http::response::{Body, Response};

const HTTP_VERSION: &str = "HTTP/1.1";

fn serialize_head(resp: &Response) -> Vec<u8> {
    let mut buf = Vec::new();

    // Status line
    let status_line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        resp.status.as_u16(),
        resp.status.reason_phrase()
    );
    buf.extend_from_slice(status_line.as_bytes());

    // Headers
    for (k, v) in &resp.headers {
        buf.extend_from_slice(k.as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(v.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }

    // Header/body separator
    buf.extend_from_slice(b"\r\n");

    buf
}

/// How far a [`ResponseWriter::write_to`] call got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteProgress {
    /// Everything, body included, has been handed to the socket.
    Complete,
    /// The socket is full; resume on the next write-readiness event.
    Blocked,
}

/// Sends a response over a non-blocking socket, resuming where it left off.
///
/// The head is serialized up front. Body bytes are pulled from the
/// [`Body`] one chunk at a time, only after the previous chunk has been
/// fully written.
#[derive(Debug)]
pub struct ResponseWriter {
    buffer: Vec<u8>,
    written: usize,
    body: Body,
    total: u64,
}

impl ResponseWriter {
    pub fn new(response: Response) -> Self {
        Self {
            buffer: serialize_head(&response),
            written: 0,
            body: response.body,
            total: 0,
        }
    }

    /// Bytes handed to the socket so far.
    pub fn bytes_written(&self) -> u64 {
        self.total
    }

    pub fn write_to<W: Write>(&mut self, out: &mut W) -> io::Result<WriteProgress> {
        loop {
            if self.written == self.buffer.len() {
                self.buffer.clear();
                self.written = 0;
                if !self.body.fill(&mut self.buffer)? {
                    return Ok(WriteProgress::Complete);
                }
                continue;
            }

            match out.write(&self.buffer[self.written..]) {
                Ok(0) => {
                    return Err(io::Error::new(
                        io::ErrorKind::WriteZero,
                        "connection closed while writing",
                    ));
                }
                Ok(n) => {
                    self.written += n;
                    self.total += n as u64;
                }
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                    return Ok(WriteProgress::Blocked);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}
