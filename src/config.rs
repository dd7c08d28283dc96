use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const BASE_URL_ENV: &str = "DOCDESK_BASE_URL";

/// Client settings, read from `<config dir>/docdesk/config.toml`
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Root of the document service, e.g. `http://127.0.0.1:8000`
    pub base_url: String,
    /// How long success/error banners stay visible
    pub banner_seconds: u64,
    /// Initial value of the search limit field
    pub search_limit: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            banner_seconds: 5,
            search_limit: 10,
        }
    }
}

impl Config {
    /// Load from the default location, then apply environment overrides.
    ///
    /// A missing file yields defaults; a malformed one is logged and ignored.
    pub fn load() -> Self {
        let mut config = match default_path() {
            Some(path) => Self::from_file(&path),
            None => Self::default(),
        };
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.trim().is_empty() {
                log::info!("Using {} from {}", url, BASE_URL_ENV);
                config.base_url = url;
            }
        }
        config
    }

    pub fn from_file(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::parse(&text).unwrap_or_else(|e| {
                log::warn!("Ignoring malformed config {}: {}", path.display(), e);
                Self::default()
            }),
            Err(_) => {
                log::debug!("No config at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    pub fn parse(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn banner_duration(&self) -> Duration {
        Duration::from_secs(self.banner_seconds)
    }
}

fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("docdesk").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.banner_duration(), Duration::from_secs(5));
        assert_eq!(config.search_limit, 10);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::parse("base_url = \"http://docs.local:9000\"").unwrap();
        assert_eq!(config.base_url, "http://docs.local:9000");
        assert_eq!(config.banner_seconds, 5);
    }

    #[test]
    fn test_malformed_file_falls_back() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "banner_seconds = \"soon\"").unwrap();
        assert_eq!(Config::from_file(file.path()), Config::default());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = Config::from_file(&dir.path().join("absent.toml"));
        assert_eq!(config, Config::default());
    }
}
