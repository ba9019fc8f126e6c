use std::io;
use std::net::SocketAddr;

use mio::Interest;
use mio::net::TcpStream;
use tracing::{debug, info, trace};

use crate::docroot::DocumentRoot;
use crate::http::handler;
use crate::http::line::{LineRead, LineReader};
use crate::http::parser::parse_request_line;
use crate::http::request::Request;
use crate::http::writer::{ResponseWriter, WriteProgress};

/// One accepted client socket and where it is in its single request.
pub struct Connection {
    stream: TcpStream,
    peer: SocketAddr,
    reader: LineReader,
    state: ConnectionState,
    interest: Interest,
}

enum ConnectionState {
    AwaitingRequestLine,
    AwaitingHeaders(Request),
    SendingResponse(ResponseWriter),
    Closed,
}

/// What the reactor should do with the connection after a readiness event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Keep it registered with this interest and wait for the next event.
    Wait(Interest),
    /// Deregister and drop it.
    Close,
}

impl Connection {
    pub fn new(stream: TcpStream, peer: SocketAddr, max_line: usize) -> Self {
        Self {
            stream,
            peer,
            reader: LineReader::with_limit(max_line),
            state: ConnectionState::AwaitingRequestLine,
            interest: Interest::READABLE,
        }
    }

    pub fn peer(&self) -> SocketAddr {
        self.peer
    }

    pub fn stream_mut(&mut self) -> &mut TcpStream {
        &mut self.stream
    }

    /// Interest the socket is currently registered with.
    pub fn interest(&self) -> Interest {
        self.interest
    }

    pub fn set_interest(&mut self, interest: Interest) {
        self.interest = interest;
    }

    /// Advances the state machine as far as the socket allows.
    ///
    /// Sockets are edge-triggered, so this keeps reading or writing until the
    /// socket would block or the connection is finished. An `Err` means the
    /// connection is broken and should be closed without a response.
    pub fn on_ready(&mut self, docroot: &DocumentRoot) -> io::Result<Transition> {
        loop {
            match &mut self.state {
                ConnectionState::AwaitingRequestLine => {
                    match self.reader.read_line(&mut self.stream)? {
                        // stray CRLF before the request line
                        LineRead::Line(line) if line.is_empty() => continue,
                        LineRead::Line(line) => {
                            let request = parse_request_line(&line);
                            info!(
                                peer = %self.peer,
                                method = %request.method,
                                path = %request.display_path(),
                                protocol = %request.version,
                                "Request received"
                            );
                            self.state = ConnectionState::AwaitingHeaders(request);
                        }
                        LineRead::Closed(partial) => {
                            debug!(
                                peer = %self.peer,
                                pending = partial.len(),
                                "Client closed before sending a request line"
                            );
                            self.state = ConnectionState::Closed;
                        }
                        LineRead::Pending => return Ok(Transition::Wait(Interest::READABLE)),
                    }
                }

                ConnectionState::AwaitingHeaders(_) => {
                    match self.reader.read_line(&mut self.stream)? {
                        LineRead::Line(line) if !line.is_empty() => {
                            trace!(
                                peer = %self.peer,
                                header = %String::from_utf8_lossy(&line),
                                "Header discarded"
                            );
                        }
                        // blank line, or a half-close, ends the header block
                        LineRead::Line(_) | LineRead::Closed(_) => self.begin_response(docroot),
                        LineRead::Pending => return Ok(Transition::Wait(Interest::READABLE)),
                    }
                }

                ConnectionState::SendingResponse(writer) => {
                    match writer.write_to(&mut self.stream)? {
                        WriteProgress::Complete => {
                            info!(
                                peer = %self.peer,
                                bytes = writer.bytes_written(),
                                "Response sent"
                            );
                            self.state = ConnectionState::Closed;
                        }
                        WriteProgress::Blocked => return Ok(Transition::Wait(Interest::WRITABLE)),
                    }
                }

                ConnectionState::Closed => return Ok(Transition::Close),
            }
        }
    }

    fn begin_response(&mut self, docroot: &DocumentRoot) {
        let ConnectionState::AwaitingHeaders(request) =
            std::mem::replace(&mut self.state, ConnectionState::Closed)
        else {
            return;
        };

        let response = handler::respond(docroot, &request);
        info!(
            peer = %self.peer,
            status = response.status.as_u16(),
            path = %request.display_path(),
            "Responding"
        );
        self.state = ConnectionState::SendingResponse(ResponseWriter::new(response));
    }
}
