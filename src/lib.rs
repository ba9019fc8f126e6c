//! dirhttpd - single-threaded static file server
//!
//! Serves files and HTML directory listings from a document root over a
//! readiness-driven reactor.

pub mod config;
pub mod docroot;
pub mod http;
pub mod server;
