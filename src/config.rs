use std::time::Duration;

use serde::Deserialize;

/// Server configuration, loaded from a YAML file with env overrides.
///
/// The file path comes from the `CONFIG` env var (default `config.yaml`).
/// A missing file is not an error; defaults apply. `LISTEN` and `DOC_ROOT`
/// override the file regardless of its presence.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub static_files: StaticFilesConfig,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to listen on, e.g. "127.0.0.1:8080".
    pub listen_addr: String,
    /// Idle window per request attempt, in seconds.
    pub read_timeout_secs: u64,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    /// Directory to serve files from.
    pub doc_root: String,
    /// File appended to URLs ending in a slash.
    pub index_file: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            read_timeout_secs: 5,
        }
    }
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            doc_root: "./public".to_string(),
            index_file: "index.html".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG").unwrap_or_else(|_| "config.yaml".to_string());

        let mut cfg: Config = match std::fs::read_to_string(&path) {
            Ok(text) => serde_yaml::from_str(&text)?,
            Err(_) => Config::default(),
        };

        if let Ok(addr) = std::env::var("LISTEN") {
            cfg.server.listen_addr = addr;
        }
        if let Ok(root) = std::env::var("DOC_ROOT") {
            cfg.static_files.doc_root = root;
        }

        Ok(cfg)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.server.read_timeout_secs)
    }
}
