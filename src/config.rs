use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::geofence::DEFAULT_SEGMENTS;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub geofence: GeofenceConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub listen: String,
    /// Fallback log filter when RUST_LOG is not set
    pub log_level: Option<String>,
    pub app_env: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:8000".to_string(),
            log_level: None,
            app_env: "development".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn is_development(&self) -> bool {
        self.app_env == "development"
    }

    /// Log filter to use: explicit level, else debug in development and info otherwise
    pub fn effective_log_level(&self) -> &str {
        match &self.log_level {
            Some(level) => level.as_str(),
            None if self.is_development() => "debug",
            None => "info",
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GeofenceConfig {
    /// Vertices used to approximate radius geofences
    pub buffer_segments: usize,
}

impl Default for GeofenceConfig {
    fn default() -> Self {
        Self {
            buffer_segments: DEFAULT_SEGMENTS,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.listen, "0.0.0.0:8000");
        assert_eq!(config.geofence.buffer_segments, DEFAULT_SEGMENTS);
        assert_eq!(config.server.effective_log_level(), "debug");
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[server]
listen = "127.0.0.1:9000"
app_env = "production"

[geofence]
buffer_segments = 128
"#
        )
        .unwrap();

        let config = Config::load_from_file(file.path()).unwrap();
        assert_eq!(config.server.listen, "127.0.0.1:9000");
        assert!(!config.server.is_development());
        assert_eq!(config.server.effective_log_level(), "info");
        assert_eq!(config.geofence.buffer_segments, 128);
    }

    #[test]
    fn test_load_errors() {
        assert!(Config::load_from_file("/nonexistent/geofence.toml").is_err());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[geofence]\nbuffer_segments = \"many\"").unwrap();
        assert!(Config::load_from_file(file.path()).is_err());
    }
}
