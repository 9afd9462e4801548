//! Application settings.
//!
//! Settings come from an optional TOML file (`registry.toml` by default, or the path in
//! `REGISTRY_CONFIG`) and are then overridden by `DATABASE_URL`, `REGISTRY_HOST` and
//! `REGISTRY_PORT` from the environment.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Default location of the settings file
pub const DEFAULT_CONFIG_PATH: &str = "registry.toml";

const DEFAULT_DATABASE_URL: &str = "sqlite://registry.sqlite?mode=rwc";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;

/// Runtime settings for the registry server
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// `SeaORM` connection URL
    pub database_url: String,
    /// Address the HTTP server binds to
    pub host: String,
    /// Port the HTTP server listens on
    pub port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Settings {
    /// `host:port` as a bind address string.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Applies environment overrides through `lookup`.
    ///
    /// # Errors
    /// Returns an error if `REGISTRY_PORT` is set but is not a valid port number.
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL") {
            self.database_url = url;
        }
        if let Some(host) = lookup("REGISTRY_HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("REGISTRY_PORT") {
            self.port = port.parse().map_err(|e| Error::Config {
                message: format!("Invalid REGISTRY_PORT '{port}': {e}"),
            })?;
        }
        Ok(self)
    }
}

/// Parses settings from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path.as_ref().display()),
    })
}

/// Loads settings the way the server binary does: file if present, defaults otherwise,
/// then environment overrides.
///
/// # Errors
/// Returns an error if an existing settings file is invalid or an override is malformed.
pub fn load_app_settings() -> Result<Settings> {
    let path = std::env::var("REGISTRY_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    let settings = if Path::new(&path).exists() {
        debug!("Loading settings from {}", path);
        load_settings(&path)?
    } else {
        debug!("No settings file at {}, using defaults", path);
        Settings::default()
    };

    settings.apply_overrides(|key| std::env::var(key).ok())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_settings() {
        let toml_str = r#"
            database_url = "sqlite::memory:"
            port = 9000
        "#;

        let settings: Settings = toml::from_str(toml_str).unwrap();
        assert_eq!(settings.database_url, "sqlite::memory:");
        assert_eq!(settings.host, "127.0.0.1");
        assert_eq!(settings.port, 9000);
        assert_eq!(settings.bind_address(), "127.0.0.1:9000");
    }

    #[test]
    fn test_environment_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("DATABASE_URL", "sqlite://other.sqlite"),
            ("REGISTRY_PORT", "3000"),
        ]);

        let settings = Settings::default()
            .apply_overrides(|key| env.get(key).map(ToString::to_string))
            .unwrap();
        assert_eq!(settings.database_url, "sqlite://other.sqlite");
        assert_eq!(settings.host, "127.0.0.1");
        assert_eq!(settings.port, 3000);
    }

    #[test]
    fn test_invalid_port_override() {
        let result = Settings::default().apply_overrides(|key| {
            (key == "REGISTRY_PORT").then(|| "not-a-port".to_string())
        });
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_settings("does/not/exist.toml");
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
