use std::collections::HashMap;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use mio::event::Event;
use mio::net::TcpListener;
use mio::{Events, Interest, Poll, Token, Waker};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::docroot::DocumentRoot;
use crate::http::connection::{Connection, Transition};
use crate::server::listener;

const LISTENER: Token = Token(0);
const WAKER: Token = Token(1);
const FIRST_CONNECTION: usize = 2;

/// Wakes a running [`Server`] and makes [`Server::run`] return.
#[derive(Clone)]
pub struct ShutdownHandle {
    waker: Arc<Waker>,
}

impl ShutdownHandle {
    pub fn shutdown(&self) -> io::Result<()> {
        self.waker.wake()
    }
}

/// Single-threaded readiness loop owning the listening socket and every
/// accepted connection.
///
/// A connection is in `connections` exactly as long as its socket is
/// registered with the poll instance; both go away together in
/// [`Server::close_connection`].
pub struct Server {
    poll: Poll,
    listener: TcpListener,
    waker: Arc<Waker>,
    connections: HashMap<Token, Connection>,
    next_token: usize,
    docroot: DocumentRoot,
    max_events: usize,
    max_line: usize,
}

impl Server {
    /// Creates the poll instance and registers the listening endpoint.
    pub fn bind(cfg: &Config) -> anyhow::Result<Self> {
        let docroot = DocumentRoot::open(&cfg.server.document_root)?;
        let poll = Poll::new().context("failed to create poll instance")?;
        let listener = listener::bind_listener(cfg, poll.registry(), LISTENER)?;
        let waker = Waker::new(poll.registry(), WAKER).context("failed to create waker")?;

        Ok(Self {
            poll,
            listener,
            waker: Arc::new(waker),
            connections: HashMap::new(),
            next_token: FIRST_CONNECTION,
            docroot,
            max_events: cfg.limits.max_events.max(1),
            max_line: cfg.limits.max_line_length,
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            waker: Arc::clone(&self.waker),
        }
    }

    /// Runs until a [`ShutdownHandle`] fires or the poll instance fails.
    pub fn run(&mut self) -> anyhow::Result<()> {
        let mut events = Events::with_capacity(self.max_events);
        info!(addr = %self.local_addr()?, root = %self.docroot.path().display(), "Listening");

        loop {
            if let Err(e) = self.poll.poll(&mut events, None) {
                if e.kind() == io::ErrorKind::Interrupted {
                    continue;
                }
                return Err(e).context("readiness wait failed");
            }

            for event in events.iter() {
                match event.token() {
                    LISTENER => self.accept_connections()?,
                    WAKER => {
                        info!(open = self.connections.len(), "Shutdown requested");
                        return Ok(());
                    }
                    token => self.handle_connection(token, event),
                }
            }
        }
    }

    /// Accepts every pending connection. The listener is edge-triggered, so
    /// stopping before `WouldBlock` could strand queued clients.
    fn accept_connections(&mut self) -> anyhow::Result<()> {
        loop {
            let (mut stream, peer) = match self.listener.accept() {
                Ok(accepted) => accepted,
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => return Ok(()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    warn!(error = %e, "accept failed");
                    return Ok(());
                }
            };

            let token = Token(self.next_token);
            self.next_token += 1;

            self.poll
                .registry()
                .register(&mut stream, token, Interest::READABLE)
                .with_context(|| format!("failed to register connection from {peer}"))?;

            info!(peer = %peer, token = token.0, "Accepted connection");
            self.connections
                .insert(token, Connection::new(stream, peer, self.max_line));
        }
    }

    fn handle_connection(&mut self, token: Token, event: &Event) {
        let Some(conn) = self.connections.get_mut(&token) else {
            return;
        };

        let ready = event.is_readable()
            || event.is_writable()
            || event.is_read_closed()
            || event.is_error();
        if !ready {
            return;
        }

        let transition = match conn.on_ready(&self.docroot) {
            Ok(t) => t,
            Err(e) => {
                warn!(peer = %conn.peer(), error = %e, "Connection error");
                Transition::Close
            }
        };

        match transition {
            Transition::Wait(interest) if interest != conn.interest() => {
                let registry = self.poll.registry();
                match registry.reregister(conn.stream_mut(), token, interest) {
                    Ok(()) => conn.set_interest(interest),
                    Err(e) => {
                        warn!(peer = %conn.peer(), error = %e, "failed to re-arm connection");
                        self.close_connection(token);
                    }
                }
            }
            Transition::Wait(_) => {}
            Transition::Close => self.close_connection(token),
        }
    }

    fn close_connection(&mut self, token: Token) {
        if let Some(mut conn) = self.connections.remove(&token) {
            if let Err(e) = self.poll.registry().deregister(conn.stream_mut()) {
                debug!(peer = %conn.peer(), error = %e, "deregister failed");
            }
            debug!(peer = %conn.peer(), token = token.0, "Connection closed");
        }
    }
}
