//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::time::Duration;

use greatescape_session::application::registry::DEFAULT_IDLE_TIMEOUT;

use crate::error::AppError;

/// Default text model.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

/// Default image model.
pub const DEFAULT_HF_IMAGE_MODEL: &str = "black-forest-labs/FLUX.1-dev";

/// Default timeout for provider requests, in seconds.
pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 60;

/// Settings read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// PostgreSQL URL for the leaderboard; in-memory when unset.
    pub database_url: Option<String>,
    /// Text provider credential.
    pub gemini_api_key: Option<String>,
    /// Text provider model.
    pub gemini_model: String,
    /// Image provider credential.
    pub hf_token: Option<String>,
    /// Image provider model.
    pub hf_image_model: String,
    /// HTTP timeout applied to both providers.
    pub provider_timeout: Duration,
    /// How long an untouched session is kept.
    pub session_idle_timeout: Duration,
    /// Generate a thumbnail per hotspot during synthesis.
    pub item_thumbnails: bool,
    /// Exit hotspots honour their `required` dependency.
    pub exit_honors_required: bool,
    /// Misleading hotspots count toward exploration progress.
    pub count_misleading_progress: bool,
}

impl AppConfig {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable holds an invalid value.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`. Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable holds an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let port = match get("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?,
            None => 3000,
        };
        let provider_timeout = seconds(
            "PROVIDER_TIMEOUT_SECS",
            get("PROVIDER_TIMEOUT_SECS"),
            Duration::from_secs(DEFAULT_PROVIDER_TIMEOUT_SECS),
        )?;
        let session_idle_timeout = seconds(
            "SESSION_IDLE_TIMEOUT_SECS",
            get("SESSION_IDLE_TIMEOUT_SECS"),
            DEFAULT_IDLE_TIMEOUT,
        )?;

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_owned()),
            port,
            database_url: get("DATABASE_URL"),
            gemini_api_key: get("GEMINI_API_KEY"),
            gemini_model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_owned()),
            hf_token: get("HF_TOKEN"),
            hf_image_model: get("HF_IMAGE_MODEL")
                .unwrap_or_else(|| DEFAULT_HF_IMAGE_MODEL.to_owned()),
            provider_timeout,
            session_idle_timeout,
            item_thumbnails: flag("ITEM_THUMBNAILS", get("ITEM_THUMBNAILS"))?,
            exit_honors_required: flag("EXIT_HONORS_REQUIRED", get("EXIT_HONORS_REQUIRED"))?,
            count_misleading_progress: flag(
                "COUNT_MISLEADING_PROGRESS",
                get("COUNT_MISLEADING_PROGRESS"),
            )?,
        })
    }

    /// The socket address to listen on.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `host` is not an IP address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}

fn seconds(key: &str, value: Option<String>, default: Duration) -> Result<Duration, AppError> {
    let Some(value) = value else {
        return Ok(default);
    };
    value
        .parse()
        .map(Duration::from_secs)
        .map_err(|e| AppError::Config(format!("{key} must be a whole number: {e}")))
}

fn flag(key: &str, value: Option<String>) -> Result<bool, AppError> {
    let Some(value) = value else {
        return Ok(false);
    };
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(AppError::Config(format!(
            "{key} must be a boolean, got `{value}`"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, AppError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert!(config.database_url.is_none());
        assert!(config.gemini_api_key.is_none());
        assert_eq!(config.gemini_model, "gemini-1.5-flash");
        assert!(config.hf_token.is_none());
        assert_eq!(config.hf_image_model, "black-forest-labs/FLUX.1-dev");
        assert_eq!(config.provider_timeout, Duration::from_secs(60));
        assert_eq!(config.session_idle_timeout, Duration::from_secs(7200));
        assert!(!config.item_thumbnails);
        assert!(!config.exit_honors_required);
        assert!(!config.count_misleading_progress);
    }

    #[test]
    fn test_reads_every_variable() {
        // Arrange
        let pairs = [
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("DATABASE_URL", "postgres://localhost/escape"),
            ("GEMINI_API_KEY", "g-key"),
            ("GEMINI_MODEL", "gemini-2.0-flash"),
            ("HF_TOKEN", "hf-token"),
            ("HF_IMAGE_MODEL", "stabilityai/sdxl"),
            ("PROVIDER_TIMEOUT_SECS", "15"),
            ("SESSION_IDLE_TIMEOUT_SECS", "900"),
            ("ITEM_THUMBNAILS", "true"),
            ("EXIT_HONORS_REQUIRED", "1"),
            ("COUNT_MISLEADING_PROGRESS", "yes"),
        ];

        // Act
        let config = config_from(&pairs).unwrap();

        // Assert
        assert_eq!(config.bind_addr().unwrap().to_string(), "127.0.0.1:8080");
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/escape")
        );
        assert_eq!(config.gemini_api_key.as_deref(), Some("g-key"));
        assert_eq!(config.gemini_model, "gemini-2.0-flash");
        assert_eq!(config.hf_token.as_deref(), Some("hf-token"));
        assert_eq!(config.hf_image_model, "stabilityai/sdxl");
        assert_eq!(config.provider_timeout, Duration::from_secs(15));
        assert_eq!(config.session_idle_timeout, Duration::from_secs(900));
        assert!(config.item_thumbnails);
        assert!(config.exit_honors_required);
        assert!(config.count_misleading_progress);
    }

    #[test]
    fn test_blank_values_count_as_unset() {
        let config = config_from(&[("GEMINI_API_KEY", "  "), ("PORT", "")]).unwrap();

        assert!(config.gemini_api_key.is_none());
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_invalid_port_is_config_error() {
        let result = config_from(&[("PORT", "eighty")]);

        assert!(matches!(result, Err(AppError::Config(msg)) if msg.contains("PORT")));
    }

    #[test]
    fn test_invalid_flag_is_config_error() {
        let result = config_from(&[("ITEM_THUMBNAILS", "sometimes")]);

        assert!(matches!(result, Err(AppError::Config(msg)) if msg.contains("ITEM_THUMBNAILS")));
    }

    #[test]
    fn test_invalid_idle_timeout_is_config_error() {
        let result = config_from(&[("SESSION_IDLE_TIMEOUT_SECS", "-5")]);

        assert!(
            matches!(result, Err(AppError::Config(msg)) if msg.contains("SESSION_IDLE_TIMEOUT_SECS"))
        );
    }

    #[test]
    fn test_invalid_host_fails_bind_addr() {
        let config = config_from(&[("HOST", "not a host")]).unwrap();

        assert!(config.bind_addr().is_err());
    }
}
