use anyhow::Context;
use dirhttpd::config::Config;
use dirhttpd::server::listener;

fn main() -> anyhow::Result<()> {
    let mut cfg = Config::load(std::env::args().skip(1))?;

    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_max_level(cfg.log_level()?)
        .init();

    // relative paths in the config are taken from the launch directory
    std::env::set_current_dir(&cfg.server.document_root).with_context(|| {
        format!("cannot enter {}", cfg.server.document_root.display())
    })?;
    cfg.server.document_root = std::env::current_dir()?;

    listener::run(&cfg)
}
