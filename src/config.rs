//! Server configuration.
//!
//! Values come from an optional YAML file (path in `HANDOFF_CONFIG`) and are
//! then overridden by the `LISTEN`, `CONTENT_ROOT` and `HANDLER` environment
//! variables. Every field has a default so an empty environment yields a
//! working server on port 3334.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming the YAML configuration file.
pub const CONFIG_ENV: &str = "HANDOFF_CONFIG";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub content: ContentConfig,
    pub handler: HandlerKind,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind, e.g. `[::]:3334`
    pub listen_addr: String,
    /// Pending-connection queue length passed to `listen`
    pub backlog: u32,
    /// Size of the single read buffer per connection
    pub max_request_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Directory every request target is resolved against
    pub root: PathBuf,
    /// File served for the `/` target
    pub homepage: String,
}

/// Which request handler the dispatcher runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandlerKind {
    /// Serve files from the content root
    #[default]
    File,
    /// Answer every request with `ACK\r\n`
    Ack,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "[::]:3334".to_string(),
            backlog: 10,
            max_request_size: 1024,
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("content"),
            homepage: "homepage.html".to_string(),
        }
    }
}

impl HandlerKind {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Some(HandlerKind::File),
            "ack" => Some(HandlerKind::Ack),
            _ => None,
        }
    }
}

impl Config {
    pub fn load() -> Self {
        let mut cfg = match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(&path).unwrap_or_else(|e| {
                tracing::warn!(path = %path, error = %e, "Falling back to default configuration");
                Self::default()
            }),
            Err(_) => Self::default(),
        };

        cfg.apply_env();
        cfg
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_yaml(&text)
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        let cfg: Config = serde_yaml::from_str(text).context("parsing YAML configuration")?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn apply_env(&mut self) {
        if let Ok(addr) = std::env::var("LISTEN") {
            self.server.listen_addr = addr;
        }
        if let Ok(root) = std::env::var("CONTENT_ROOT") {
            self.content.root = PathBuf::from(root);
        }
        if let Ok(kind) = std::env::var("HANDLER") {
            match HandlerKind::from_str(&kind) {
                Some(kind) => self.handler = kind,
                None => tracing::warn!(handler = %kind, "Ignoring unknown HANDLER value"),
            }
        }
    }

    fn validate(&self) -> Result<()> {
        // One byte of the buffer is reserved, so a request needs at least two.
        if self.server.max_request_size < 2 {
            anyhow::bail!(
                "max_request_size must be at least 2, got {}",
                self.server.max_request_size
            );
        }
        if self.server.backlog == 0 {
            anyhow::bail!("backlog must be greater than zero");
        }
        Ok(())
    }
}
