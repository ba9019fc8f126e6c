use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::http::line::DEFAULT_MAX_LINE;

/// Environment variable naming an optional YAML configuration file.
pub const CONFIG_ENV: &str = "DIRHTTPD_CONFIG";

pub const USAGE: &str = "usage: dirhttpd <port> <document-root>";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub limits: LimitsConfig,
    /// One of trace, debug, info, warn, error.
    pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    pub document_root: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Longest request or header line, terminator slot included.
    pub max_line_length: usize,
    /// Readiness events handled per wait.
    pub max_events: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            limits: LimitsConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 8080,
            document_root: PathBuf::new(),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_line_length: DEFAULT_MAX_LINE,
            max_events: 20,
        }
    }
}

impl Config {
    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(text).context("invalid configuration")
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Builds the configuration from the file named by `DIRHTTPD_CONFIG`
    /// (if set) and the positional `<port> <document-root>` arguments.
    pub fn load<I>(args: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let file = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        Self::load_from(args, file.as_deref())
    }

    /// Like [`Config::load`] with the config file given explicitly.
    /// Positional arguments win over the file.
    pub fn load_from<I>(args: I, file: Option<&Path>) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut cfg = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        let mut args = args.into_iter();
        if let Some(port) = args.next() {
            cfg.server.port = port
                .parse()
                .with_context(|| format!("invalid port {port:?}\n{USAGE}"))?;
        }
        if let Some(root) = args.next() {
            cfg.server.document_root = PathBuf::from(root);
        }

        if cfg.server.document_root.as_os_str().is_empty() {
            anyhow::bail!("no document root given\n{USAGE}");
        }

        Ok(cfg)
    }

    pub fn listen_addr(&self) -> anyhow::Result<SocketAddr> {
        let ip: IpAddr = self
            .server
            .bind
            .parse()
            .with_context(|| format!("invalid bind address {:?}", self.server.bind))?;
        Ok(SocketAddr::new(ip, self.server.port))
    }

    pub fn log_level(&self) -> anyhow::Result<tracing::Level> {
        self.log_level
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid log level {:?}", self.log_level))
    }
}
