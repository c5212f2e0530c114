/// Server configuration
use crate::error::{Result, ServerError};
use lesson_core::drive::{DEFAULT_DOWNLOAD_URL, DEFAULT_PROXY_ROUTE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file read when no explicit path is given
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_proxy")]
    pub proxy: ProxySettings,

    #[serde(default = "default_content")]
    pub content: ContentSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProxySettings {
    /// Upstream download endpoint; the file id is appended as `id=`
    #[serde(default = "default_download_url")]
    pub download_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Path the audio proxy is mounted on
    #[serde(default = "default_route")]
    pub route: String,
}

impl ProxySettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContentSettings {
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,

    /// Static web UI root
    #[serde(default = "default_web_dir")]
    pub web_dir: PathBuf,
}

impl ServerConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `config.toml` is read when
    /// present. Environment variables prefixed with `LESSON_` override
    /// file values, with `__` between section and key
    /// (`LESSON_SERVER__PORT=9000`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        settings = match path {
            Some(path) => settings.add_source(config::File::from(path)),
            None => settings
                .add_source(config::File::from(PathBuf::from(DEFAULT_CONFIG_FILE)).required(false)),
        };

        settings = settings.add_source(
            config::Environment::with_prefix("LESSON")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(ServerError::Config("server.port must not be 0".to_string()));
        }

        if self.proxy.timeout_secs == 0 {
            return Err(ServerError::Config(
                "proxy.timeout_secs must be greater than 0".to_string(),
            ));
        }

        let url = &self.proxy.download_url;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ServerError::Config(format!(
                "proxy.download_url must be http(s): {url}"
            )));
        }

        if !self.proxy.route.starts_with('/') {
            return Err(ServerError::Config(format!(
                "proxy.route must start with '/': {}",
                self.proxy.route
            )));
        }

        Ok(())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_proxy() -> ProxySettings {
    ProxySettings {
        download_url: default_download_url(),
        timeout_secs: default_timeout_secs(),
        route: default_route(),
    }
}

fn default_download_url() -> String {
    DEFAULT_DOWNLOAD_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_route() -> String {
    DEFAULT_PROXY_ROUTE.to_string()
}

fn default_content() -> ContentSettings {
    ContentSettings {
        catalog_path: default_catalog_path(),
        web_dir: default_web_dir(),
    }
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("lessons.json")
}

fn default_web_dir() -> PathBuf {
    PathBuf::from("./web")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            proxy: default_proxy(),
            content: default_content(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = ServerConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.proxy.route, "/api/audio");
        assert_eq!(config.proxy.timeout(), Duration::from_secs(60));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[server]\nport = 9000\n\n[content]\nweb_dir = \"/srv/web\"").unwrap();

        let config = ServerConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.content.web_dir, PathBuf::from("/srv/web"));
        assert_eq!(config.content.catalog_path, PathBuf::from("lessons.json"));
        assert_eq!(config.proxy.download_url, DEFAULT_DOWNLOAD_URL);
    }

    #[test]
    fn explicit_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(matches!(
            ServerConfig::load(Some(&missing)),
            Err(ServerError::Config(_))
        ));
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut config = ServerConfig::default();
        config.server.port = 0;
        assert!(config.validate().is_err());

        let mut config = ServerConfig::default();
        config.proxy.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = ServerConfig::default();
        config.proxy.download_url = "ftp://example.com/file".to_string();
        assert!(config.validate().is_err());

        let mut config = ServerConfig::default();
        config.proxy.route = "api/audio".to_string();
        assert!(config.validate().is_err());
    }
}
