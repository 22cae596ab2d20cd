//! Configuration management
//!
//! The browser bundle can only see compile-time values, so the API address
//! is baked in via `CMC_API_BASE_URL`. The server additionally layers a
//! config file and `CMC_*` environment variables on top of the defaults.

use serde::Deserialize;
use std::sync::OnceLock;
use std::time::Duration;
use thiserror::Error;

/// Backend address used when nothing else is configured
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5014/api";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid api_base_url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[cfg(feature = "server")]
    #[error(transparent)]
    Source(#[from] ::config::ConfigError),
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Per-request timeout; 0 disables it
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Bound on the profile fetch during rehydration
    #[serde(default = "default_profile_timeout_secs")]
    pub profile_timeout_secs: u64,
}

fn default_api_base_url() -> String {
    option_env!("CMC_API_BASE_URL")
        .unwrap_or(DEFAULT_API_BASE_URL)
        .to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_profile_timeout_secs() -> u64 {
    10
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            profile_timeout_secs: default_profile_timeout_secs(),
        }
    }
}

static INSTALLED: OnceLock<AppConfig> = OnceLock::new();

impl AppConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    pub fn profile_timeout(&self) -> Duration {
        Duration::from_secs(self.profile_timeout_secs.max(1))
    }

    /// Check the base URL and strip any trailing slash.
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidBaseUrl {
            url: self.api_base_url.clone(),
            reason,
        };
        let parsed = url::Url::parse(&self.api_base_url).map_err(|e| invalid(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {}", parsed.scheme())));
        }
        self.api_base_url = self.api_base_url.trim_end_matches('/').to_string();
        Ok(self)
    }

    /// Make `self` the process-wide configuration. Only the first call wins.
    pub fn install(self) -> &'static AppConfig {
        INSTALLED.get_or_init(|| self)
    }

    /// Installed configuration, or the compile-time defaults.
    pub fn current() -> AppConfig {
        INSTALLED.get().cloned().unwrap_or_default()
    }
}

/// Get config directory (CMC_CONFIG_DIR or platform default)
#[cfg(feature = "server")]
pub fn get_config_dir() -> std::path::PathBuf {
    if let Ok(dir) = std::env::var("CMC_CONFIG_DIR") {
        return std::path::PathBuf::from(dir);
    }

    #[cfg(target_os = "macos")]
    {
        if let Ok(home) = std::env::var("HOME") {
            return std::path::PathBuf::from(home).join("Library/Application Support/cmc-portal");
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            return std::path::PathBuf::from(xdg).join("cmc-portal");
        }
        if let Ok(home) = std::env::var("HOME") {
            return std::path::PathBuf::from(home).join(".config/cmc-portal");
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Ok(appdata) = std::env::var("APPDATA") {
            return std::path::PathBuf::from(appdata).join("cmc-portal");
        }
    }

    // Fallback to current directory
    std::path::PathBuf::from(".")
}

#[cfg(feature = "server")]
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let config_dir = get_config_dir();
    let defaults = AppConfig::default();

    let config = ::config::Config::builder()
        // Start with defaults
        .set_default("api_base_url", defaults.api_base_url)?
        .set_default("request_timeout_secs", defaults.request_timeout_secs)?
        .set_default("profile_timeout_secs", defaults.profile_timeout_secs)?
        // Load from config file if it exists
        .add_source(
            ::config::File::with_name(&config_dir.join("config").to_string_lossy()).required(false),
        )
        // Override with environment variables (CMC_API_BASE_URL, CMC_REQUEST_TIMEOUT_SECS, ...)
        .add_source(
            ::config::Environment::with_prefix("CMC")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize::<AppConfig>()?.validated()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_backend() {
        let config = AppConfig::default();
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.profile_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn zero_request_timeout_disables_it() {
        let config = AppConfig {
            request_timeout_secs: 0,
            profile_timeout_secs: 0,
            ..AppConfig::default()
        };
        assert_eq!(config.request_timeout(), None);
        assert_eq!(config.profile_timeout(), Duration::from_secs(1));
    }

    #[test]
    fn validation_strips_trailing_slash() {
        let config = AppConfig {
            api_base_url: "https://api.cmc.km/api/".into(),
            ..AppConfig::default()
        }
        .validated()
        .unwrap();
        assert_eq!(config.api_base_url, "https://api.cmc.km/api");
    }

    #[test]
    fn validation_rejects_relative_and_non_http_urls() {
        for url in ["/api", "ftp://files.cmc.km", "localhost"] {
            let result = AppConfig {
                api_base_url: url.into(),
                ..AppConfig::default()
            }
            .validated();
            assert!(
                matches!(result, Err(ConfigError::InvalidBaseUrl { .. })),
                "{url} should be rejected"
            );
        }
    }

    #[cfg(feature = "server")]
    mod loading {
        use super::super::*;
        use serial_test::serial;
        use std::env;

        #[test]
        #[serial]
        fn env_overrides_defaults() {
            env::set_var("CMC_CONFIG_DIR", "/tmp/cmc-test-nonexistent");
            env::set_var("CMC_API_BASE_URL", "https://backend.cmc.km/api/");
            env::set_var("CMC_PROFILE_TIMEOUT_SECS", "3");

            let config = load_config().expect("config should load");

            env::remove_var("CMC_API_BASE_URL");
            env::remove_var("CMC_PROFILE_TIMEOUT_SECS");
            env::remove_var("CMC_CONFIG_DIR");

            assert_eq!(config.api_base_url, "https://backend.cmc.km/api");
            assert_eq!(config.profile_timeout_secs, 3);
            assert_eq!(config.request_timeout_secs, 30);
        }

        #[test]
        #[serial]
        fn config_file_is_read_from_config_dir() {
            let dir = tempfile::tempdir().unwrap();
            std::fs::write(
                dir.path().join("config.toml"),
                "api_base_url = \"http://10.0.0.5:5014/api\"\nrequest_timeout_secs = 5\n",
            )
            .unwrap();
            env::set_var("CMC_CONFIG_DIR", dir.path());

            let config = load_config().expect("config should load");

            env::remove_var("CMC_CONFIG_DIR");

            assert_eq!(config.api_base_url, "http://10.0.0.5:5014/api");
            assert_eq!(config.request_timeout_secs, 5);
        }

        #[test]
        #[serial]
        fn single_underscore_env_wins_over_config_file() {
            let dir = tempfile::tempdir().unwrap();
            std::fs::write(dir.path().join("config.toml"), "request_timeout_secs = 5\n").unwrap();
            env::set_var("CMC_CONFIG_DIR", dir.path());
            env::set_var("CMC_REQUEST_TIMEOUT_SECS", "7");

            let config = load_config().expect("config should load");

            env::remove_var("CMC_REQUEST_TIMEOUT_SECS");
            env::remove_var("CMC_CONFIG_DIR");

            assert_eq!(config.request_timeout_secs, 7);
        }

        #[test]
        #[serial]
        fn invalid_base_url_is_an_error() {
            env::set_var("CMC_CONFIG_DIR", "/tmp/cmc-test-nonexistent");
            env::set_var("CMC_API_BASE_URL", "not a url");

            let result = load_config();

            env::remove_var("CMC_API_BASE_URL");
            env::remove_var("CMC_CONFIG_DIR");

            assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));
        }
    }
}
