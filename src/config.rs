use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8081,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// JSON array of chamados; the built-in seed is used when unset
    pub seed_path: Option<PathBuf>,
}

impl AppConfig {
    /// Load `CONFIG_PATH` (or `config.toml`) if present, then apply the `PORT` override
    pub fn load() -> Result<Self> {
        let path = std::env::var("CONFIG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

        let mut config = Self::from_file(&path)?;
        config.apply_port_override(std::env::var("PORT").ok().as_deref())?;
        Ok(config)
    }

    /// A missing file yields the defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        Self::from_toml_str(&raw).with_context(|| format!("Invalid config file {:?}", path))
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// An unset or empty value keeps the configured port
    pub fn apply_port_override(&mut self, port: Option<&str>) -> Result<()> {
        match port.map(str::trim) {
            Some(value) if !value.is_empty() => {
                self.server.port = value
                    .parse()
                    .with_context(|| format!("Invalid PORT value {:?}", value))?;
                info!("PORT override: {}", self.server.port);
            }
            _ => {}
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.bind_address(), "0.0.0.0:8081");
        assert!(config.storage.seed_path.is_none());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml_str("[server]\nport = 9000\n").unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");

        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config.server.port, 8081);
    }

    #[test]
    fn test_storage_section() {
        let config =
            AppConfig::from_toml_str("[storage]\nseed_path = \"data/chamados.json\"\n").unwrap();
        assert_eq!(
            config.storage.seed_path,
            Some(PathBuf::from("data/chamados.json"))
        );
    }

    #[test]
    fn test_invalid_toml() {
        assert!(AppConfig::from_toml_str("[server]\nport = \"abc\"\n").is_err());
    }

    #[test]
    fn test_port_override() {
        let mut config = AppConfig::default();

        config.apply_port_override(None).unwrap();
        assert_eq!(config.server.port, 8081);

        config.apply_port_override(Some("")).unwrap();
        assert_eq!(config.server.port, 8081);

        config.apply_port_override(Some("3000")).unwrap();
        assert_eq!(config.server.port, 3000);

        assert!(config.apply_port_override(Some("http")).is_err());
        assert!(config.apply_port_override(Some("70000")).is_err());
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_from_file() {
        let missing = AppConfig::from_file(Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(missing.server.port, 8081);

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nhost = \"127.0.0.1\"\nport = 8181").unwrap();
        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:8181");
    }
}
