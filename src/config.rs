use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub export: ExportConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory of book records, one `{id}.json` per book.
    pub books_dir: PathBuf,
    /// Root that stored cover paths such as `/uploads/cover.png` resolve against.
    pub assets_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Exports rendering at the same time; 0 means one per CPU.
    pub max_concurrent_exports: usize,
    /// Size of the chunks a streamed PDF is sent in.
    pub stream_chunk_size: usize,
}

impl ExportConfig {
    pub fn concurrency(&self) -> usize {
        match self.max_concurrent_exports {
            0 => num_cpus::get(),
            n => n,
        }
    }
}

/// A bearer token and the user it authenticates.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenEntry {
    pub token: String,
    pub user_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub tokens: Vec<TokenEntry>,
}

impl AuthConfig {
    /// Token to user id. Later entries win over earlier duplicates.
    pub fn token_map(&self) -> HashMap<String, String> {
        self.tokens
            .iter()
            .map(|e| (e.token.clone(), e.user_id.clone()))
            .collect()
    }
}

const DEFAULT_CONFIG: &str = "config/default";

impl Config {
    /// Loads `config/default.toml` (or the file named by `QUIRE_CONFIG`),
    /// then applies `QUIRE__SECTION__KEY` environment overrides.
    pub fn load() -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        let path = std::env::var("QUIRE_CONFIG")
            .ok()
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_CONFIG.to_string());
        let base_path = config_base(&path);
        builder = builder.add_source(config::File::with_name(&path).required(false));

        builder = builder.add_source(config::Environment::with_prefix("QUIRE").separator("__"));

        let mut config: Config = builder.build()?.try_deserialize()?;
        if let Some(base) = base_path {
            config.resolve_paths(&base);
        }
        Ok(config)
    }

    /// Makes relative storage paths relative to `base` instead of the working directory.
    fn resolve_paths(&mut self, base: &Path) {
        if self.storage.books_dir.is_relative() {
            self.storage.books_dir = base.join(&self.storage.books_dir);
        }
        if self.storage.assets_dir.is_relative() {
            self.storage.assets_dir = base.join(&self.storage.assets_dir);
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// The directory holding the `config/` folder of an explicit config file.
fn config_base(path: &str) -> Option<PathBuf> {
    if path == DEFAULT_CONFIG {
        return None;
    }
    let file = Path::new(path);
    file.parent()
        .and_then(|dir| dir.parent())
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_and_token_map() {
        let config: Config = serde_json::from_value(json!({
            "server": { "host": "127.0.0.1", "port": 3000 },
            "storage": { "books_dir": "data/books", "assets_dir": "data/assets" },
            "export": { "max_concurrent_exports": 0, "stream_chunk_size": 65536 },
            "auth": { "tokens": [
                { "token": "t1", "user_id": "ada" },
                { "token": "t2", "user_id": "grace" }
            ]}
        }))
        .unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert!(config.export.concurrency() >= 1);
        let tokens = config.auth.token_map();
        assert_eq!(tokens.get("t2").map(String::as_str), Some("grace"));
    }

    #[test]
    fn test_later_token_entry_wins() {
        let auth: AuthConfig = serde_json::from_value(json!({
            "tokens": [
                { "token": "Shared-Token", "user_id": "ada" },
                { "token": "Shared-Token", "user_id": "grace" }
            ]
        }))
        .unwrap();

        let tokens = auth.token_map();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens.get("Shared-Token").map(String::as_str), Some("grace"));
    }

    #[test]
    fn test_relative_paths_follow_config_location() {
        assert_eq!(config_base("config/default"), None);
        assert_eq!(
            config_base("/srv/quire/config/prod"),
            Some(PathBuf::from("/srv/quire"))
        );
        assert_eq!(config_base("config/prod"), None);
    }
}
