use anyhow::Context;
use mio::net::TcpListener;
use mio::{Interest, Registry, Token};
use tracing::info;

use crate::config::Config;
use crate::server::reactor::Server;

/// Binds the listening endpoint and registers it for read readiness.
///
/// mio enables `SO_REUSEADDR` on Unix, so a restarted server can rebind
/// while old connections sit in TIME_WAIT.
pub fn bind_listener(
    cfg: &Config,
    registry: &Registry,
    token: Token,
) -> anyhow::Result<TcpListener> {
    let addr = cfg.listen_addr()?;
    let mut listener =
        TcpListener::bind(addr).with_context(|| format!("failed to bind {addr}"))?;

    registry
        .register(&mut listener, token, Interest::READABLE)
        .context("failed to register listening socket")?;

    info!("Bound {}", listener.local_addr()?);
    Ok(listener)
}

/// Serves `cfg.server.document_root` on the configured address until the
/// reactor fails.
pub fn run(cfg: &Config) -> anyhow::Result<()> {
    let mut server = Server::bind(cfg)?;
    server.run()
}
