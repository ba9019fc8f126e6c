//! HTTP protocol implementation.
//!
//! A deliberately small HTTP/1.x: one GET per connection, answered with a
//! file or a directory listing, then the connection is closed.
//!
//! # Architecture
//!
//! - **`line`**: buffered line reader with CR/LF terminator handling
//! - **`parser`**: splits the request line into method, path and protocol
//! - **`request`**: the parsed request line
//! - **`percent`**: percent-encoding for links and request paths
//! - **`mime`**: content type by file extension
//! - **`response`**: status codes, headers and body sources
//! - **`writer`**: resumable, non-blocking response serialization
//! - **`handler`**: maps a request onto the document root
//! - **`connection`**: the per-connection state machine driven by the reactor
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌──────────────────────┐
//!        │ AwaitingRequestLine  │ ← skip blank lines, parse the first one
//!        └──────────┬───────────┘
//!                   │ request line read        (peer closed → Closed)
//!                   ▼
//!        ┌──────────────────────┐
//!        │  AwaitingHeaders     │ ← discard header lines
//!        └──────────┬───────────┘
//!                   │ blank line or half-close
//!                   ▼
//!        ┌──────────────────────┐
//!        │  SendingResponse     │ ← resumes on write readiness
//!        └──────────┬───────────┘
//!                   │ body exhausted
//!                   ▼
//!                 Closed
//! ```

pub mod connection;
pub mod handler;
pub mod line;
pub mod mime;
pub mod parser;
pub mod percent;
pub mod request;
pub mod response;
pub mod writer;
