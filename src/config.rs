//! Configuration loading and constants.
//!
//! Configuration comes from an optional TOML file, then `PORT` and
//! `ENVIRONMENT` from the process environment are layered on top. Without a
//! file every field falls back to the defaults below, so the service can be
//! started bare on a platform that only injects `PORT`.

use std::net::SocketAddr;
use std::path::Path;

use const_format::formatcp;
use serde::Deserialize;

// =============================================================================
// HTTP Response Cache Control
// =============================================================================

/// Discovery payload only changes on redeploy
pub const HTTP_CACHE_DISCOVERY_MAX_AGE: u32 = 300;

pub const CACHE_CONTROL_DISCOVERY: &str =
    formatcp!("public, max-age={}", HTTP_CACHE_DISCOVERY_MAX_AGE);

/// Advice responses and health probes are per-request
pub const CACHE_CONTROL_NO_STORE: &str = "no-store";

// =============================================================================
// Server Lifecycle
// =============================================================================

/// Seconds to let in-flight requests finish after a shutdown signal
pub const GRACEFUL_SHUTDOWN_SECS: u64 = 30;

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Default log filter when neither --log-level nor RUST_LOG is set
pub const DEFAULT_LOG_FILTER: &str = "wellness_agent=info,tower_http=info";

/// Environment name reported when none is configured
pub const DEFAULT_ENVIRONMENT: &str = "development";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

pub const DEFAULT_SERVICE_NAME: &str = "wellness-agent-lightweight";
pub const DEFAULT_SERVICE_TITLE: &str = "Wellness Agent API - Lightweight Version";
pub const DEFAULT_SERVICE_DESCRIPTION: &str = "AI-powered wellness advice and support";
pub const DEFAULT_SERVICE_VERSION: &str = "1.0.0";

/// Environment variable overriding `http.port`
pub const PORT_ENV: &str = "PORT";

/// Environment variable overriding `environment`
pub const ENVIRONMENT_ENV: &str = "ENVIRONMENT";

/// Credential variables reported at startup. Their values are never read
/// beyond a presence check.
pub const API_KEY_ENVS: [&str; 3] = ["GEMINI_API_KEY", "GEMINI_API_KEY_BACKUP", "GROQ_API_KEY"];

/// Value written into generated sample env files; treated as unset
pub const API_KEY_PLACEHOLDER: &str = "your_primary_key_here";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Deployment environment name. Free text, only reported at startup.
    #[serde(default = "AppConfig::default_environment")]
    pub environment: String,
    /// HTTP server configuration
    #[serde(default)]
    pub http: HttpServerConfig,
    /// Identity reported by the health and discovery endpoints
    #[serde(default)]
    pub service: ServiceConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Self::default_environment(),
            http: HttpServerConfig::default(),
            service: ServiceConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "HttpServerConfig::default_host")]
    pub host: String,
    #[serde(default = "HttpServerConfig::default_port")]
    pub port: u16,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
        }
    }
}

impl HttpServerConfig {
    fn default_host() -> String {
        DEFAULT_HOST.to_string()
    }

    fn default_port() -> u16 {
        DEFAULT_PORT
    }

    /// Parse `host:port` into a bindable address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConfigError::Validation(format!("Invalid http.host or http.port: {e}")))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Service name returned by /health
    #[serde(default = "ServiceConfig::default_name")]
    pub name: String,
    /// Headline returned by the discovery endpoint
    #[serde(default = "ServiceConfig::default_title")]
    pub title: String,
    #[serde(default = "ServiceConfig::default_description")]
    pub description: String,
    /// API version string (independent of the crate version)
    #[serde(default = "ServiceConfig::default_version")]
    pub version: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: Self::default_name(),
            title: Self::default_title(),
            description: Self::default_description(),
            version: Self::default_version(),
        }
    }
}

impl ServiceConfig {
    fn default_name() -> String {
        DEFAULT_SERVICE_NAME.to_string()
    }
    fn default_title() -> String {
        DEFAULT_SERVICE_TITLE.to_string()
    }
    fn default_description() -> String {
        DEFAULT_SERVICE_DESCRIPTION.to_string()
    }
    fn default_version() -> String {
        DEFAULT_SERVICE_VERSION.to_string()
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

impl AppConfig {
    fn default_environment() -> String {
        DEFAULT_ENVIRONMENT.to_string()
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Apply `PORT` and `ENVIRONMENT` overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup(PORT_ENV) {
            self.http.port = port.trim().parse().map_err(|_| {
                ConfigError::Validation(format!("{PORT_ENV} must be a port number, got \"{port}\""))
            })?;
        }

        if let Some(environment) = lookup(ENVIRONMENT_ENV) {
            let environment = environment.trim();
            if !environment.is_empty() {
                self.environment = environment.to_string();
            }
        }

        Ok(())
    }
}

/// Which upstream API credentials are present in the environment.
///
/// The advice engine is rule-based; keys are only reported so operators can
/// see which mode a deployment would run in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiKeyStatus {
    pub configured: Vec<&'static str>,
}

impl ApiKeyStatus {
    pub fn from_env() -> Self {
        Self::detect(|key| std::env::var(key).ok())
    }

    pub fn detect<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let configured = API_KEY_ENVS
            .iter()
            .copied()
            .filter(|key| {
                lookup(*key)
                    .map(|value| {
                        let value = value.trim();
                        !value.is_empty() && value != API_KEY_PLACEHOLDER
                    })
                    .unwrap_or(false)
            })
            .collect();

        Self { configured }
    }

    pub fn is_empty(&self) -> bool {
        self.configured.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_match_lightweight_service() {
        let config = AppConfig::default();
        assert_eq!(config.environment, "development");
        assert_eq!(config.http.host, "0.0.0.0");
        assert_eq!(config.http.port, 8000);
        assert_eq!(config.service.name, "wellness-agent-lightweight");
        assert_eq!(config.service.version, "1.0.0");
        assert_eq!(config.logging.format, LogFormat::Text);
    }

    #[test]
    fn load_reads_partial_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
environment = "production"

[http]
port = 9100

[logging]
format = "json"
"#
        )
        .unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.environment, "production");
        assert_eq!(config.http.host, DEFAULT_HOST);
        assert_eq!(config.http.port, 9100);
        assert_eq!(config.service.title, DEFAULT_SERVICE_TITLE);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn load_accepts_any_environment_name() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"environment = "staging""#).unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.environment, "staging");
    }

    #[test]
    fn load_rejects_bad_log_format() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nformat = \"xml\"").unwrap();

        assert!(matches!(
            AppConfig::load(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(matches!(AppConfig::load(missing), Err(ConfigError::Io(_))));
    }

    #[test]
    fn env_overrides_port_and_environment() {
        let mut config = AppConfig::default();
        config
            .apply_overrides(lookup(&[("PORT", "10000"), ("ENVIRONMENT", "production")]))
            .unwrap();
        assert_eq!(config.http.port, 10000);
        assert_eq!(config.environment, "production");
    }

    #[test]
    fn env_rejects_bad_port() {
        let mut config = AppConfig::default();
        let err = config
            .apply_overrides(lookup(&[("PORT", "eighty")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert_eq!(config.http.port, DEFAULT_PORT);
    }

    #[test]
    fn env_accepts_free_text_environment() {
        let mut config = AppConfig::default();
        config
            .apply_overrides(lookup(&[("ENVIRONMENT", " staging ")]))
            .unwrap();
        assert_eq!(config.environment, "staging");

        config
            .apply_overrides(lookup(&[("ENVIRONMENT", "")]))
            .unwrap();
        assert_eq!(config.environment, "staging");
    }

    #[test]
    fn socket_addr_parses_host_and_port() {
        let http = HttpServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
        };
        assert_eq!(http.socket_addr().unwrap().to_string(), "127.0.0.1:8080");

        let bad = HttpServerConfig {
            host: "not a host".to_string(),
            port: 8080,
        };
        assert!(bad.socket_addr().is_err());
    }

    #[test]
    fn api_keys_ignore_blank_and_placeholder() {
        let status = ApiKeyStatus::detect(lookup(&[
            ("GEMINI_API_KEY", "your_primary_key_here"),
            ("GEMINI_API_KEY_BACKUP", "  "),
            ("GROQ_API_KEY", "gsk_live"),
        ]));
        assert_eq!(status.configured, vec!["GROQ_API_KEY"]);
        assert!(!status.is_empty());

        assert!(ApiKeyStatus::detect(lookup(&[])).is_empty());
    }
}
