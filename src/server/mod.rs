//! Connection reactor.
//!
//! One thread, one [`mio::Poll`]. The listening socket and every accepted
//! connection are registered with it; each readiness event either accepts
//! new clients or advances one connection's state machine.

pub mod listener;
pub mod reactor;

pub use reactor::{Server, ShutdownHandle};
