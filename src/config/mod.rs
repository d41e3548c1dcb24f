//! Configuration for the remote news client.
//!
//! Read from `~/.config/gazette/config.toml` at startup; a commented
//! template is written on first run. The API key can also be supplied
//! through the `GAZETTE_API_KEY` environment variable, which wins over
//! the file. Keys are never compiled into the binary.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use serde::Deserialize;

use crate::app::error::{GazetteError, Result};

pub const API_KEY_ENV: &str = "GAZETTE_API_KEY";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// newsapi.org API key. Optional here so that purely local commands
    /// (bookmarks, settings) work without one.
    pub api_key: Option<String>,
    pub base_url: String,
    pub default_country: String,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://newsapi.org/v2".into(),
            default_country: "us".into(),
            timeout_secs: 10,
        }
    }
}

impl Config {
    /// Load configuration from the default path, creating a commented
    /// template if none exists. Missing fields use defaults; the
    /// environment override is applied last.
    pub fn load() -> Result<Self> {
        let path = Self::default_config_path()?;

        let config = if path.exists() {
            let content = fs::read_to_string(&path)?;
            toml::from_str(&content)
                .map_err(|e| GazetteError::Config(format!("{}: {e}", path.display())))?
        } else {
            Self::write_template(&path)?;
            Self::default()
        };

        Ok(config.with_env_overrides())
    }

    /// Get the default config file path: `~/.config/gazette/config.toml`
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| GazetteError::Config("could not find config directory".into()))?;
        Ok(config_dir.join("gazette").join("config.toml"))
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.is_empty() {
                self.api_key = Some(key);
            }
        }
        self
    }

    fn write_template(path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::File::create(path)?;
        file.write_all(Self::template_content().as_bytes())?;
        Ok(())
    }

    fn template_content() -> &'static str {
        r#"# Gazette configuration
#
# The newsapi.org API key may be set here or via the GAZETTE_API_KEY
# environment variable (the environment wins).

# api_key = "..."

# Base URL of the news provider.
base_url = "https://newsapi.org/v2"

# Country applied to top-headlines requests that don't specify one.
default_country = "us"

# Upper bound on a single request's duration, in seconds.
timeout_secs = 10
"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_newsapi() {
        let c = Config::default();
        assert_eq!(c.base_url, "https://newsapi.org/v2");
        assert_eq!(c.default_country, "us");
        assert_eq!(c.timeout_secs, 10);
        assert!(c.api_key.is_none());
    }

    #[test]
    fn partial_toml_fills_missing_fields() {
        let c: Config = toml::from_str(r#"api_key = "abc123""#).unwrap();
        assert_eq!(c.api_key.as_deref(), Some("abc123"));
        assert_eq!(c.base_url, "https://newsapi.org/v2");
        assert_eq!(c.timeout_secs, 10);
    }

    #[test]
    fn template_parses_back_to_defaults() {
        let c: Config = toml::from_str(Config::template_content()).unwrap();
        assert_eq!(c.base_url, Config::default().base_url);
        assert!(c.api_key.is_none());
    }
}
