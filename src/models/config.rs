//! Application configuration structures.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Environment variable holding the OAuth consumer key.
pub const ENV_CONSUMER_KEY: &str = "BUZZSTREAM_CONSUMER_KEY";
/// Environment variable holding the OAuth consumer secret.
pub const ENV_CONSUMER_SECRET: &str = "BUZZSTREAM_CONSUMER_SECRET";
/// Environment variable overriding the server bind address.
pub const ENV_BIND: &str = "BUZZREPORT_BIND";
/// Environment variable overriding the API base URL.
pub const ENV_BASE_URL: &str = "BUZZREPORT_BASE_URL";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Remote API and HTTP client settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Web server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Report shaping settings
    #[serde(default)]
    pub report: ReportConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Extra or overriding relationship stage labels, keyed by stage id
    #[serde(default)]
    pub stages: HashMap<String, String>,

    /// Static OAuth key pair (environment variables take precedence)
    #[serde(default)]
    pub credentials: Option<Credentials>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Apply overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable source.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(bind) = lookup(ENV_BIND).filter(|v| !v.trim().is_empty()) {
            self.server.bind = bind;
        }
        if let Some(base) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            self.api.base_url = base;
        }

        let key = lookup(ENV_CONSUMER_KEY).filter(|v| !v.is_empty());
        let secret = lookup(ENV_CONSUMER_SECRET).filter(|v| !v.is_empty());
        match (key, secret) {
            (Some(consumer_key), Some(consumer_secret)) => {
                self.credentials = Some(Credentials {
                    consumer_key,
                    consumer_secret,
                });
            }
            (Some(_), None) | (None, Some(_)) => {
                log::warn!(
                    "Only one of {} / {} is set; ignoring environment credentials",
                    ENV_CONSUMER_KEY,
                    ENV_CONSUMER_SECRET
                );
            }
            (None, None) => {}
        }
        self
    }

    /// Credentials, or a configuration error naming the variables to set.
    pub fn require_credentials(&self) -> Result<Credentials> {
        self.credentials
            .clone()
            .filter(|c| !c.consumer_key.is_empty() && !c.consumer_secret.is_empty())
            .ok_or_else(|| {
                AppError::config(format!(
                    "missing API credentials; set {ENV_CONSUMER_KEY} and {ENV_CONSUMER_SECRET}"
                ))
            })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.api.base_url)?;
        if self.api.user_agent.trim().is_empty() {
            return Err(AppError::validation("api.user_agent is empty"));
        }
        if self.api.timeout_secs == 0 {
            return Err(AppError::validation("api.timeout_secs must be > 0"));
        }
        if self.api.page_size == 0 || self.api.history_page_size == 0 {
            return Err(AppError::validation("api page sizes must be > 0"));
        }
        if self.api.max_concurrent == 0 {
            return Err(AppError::validation("api.max_concurrent must be > 0"));
        }
        if self.report.phases.is_empty() {
            return Err(AppError::validation("report.phases is empty"));
        }
        if self.report.zone().is_none() {
            return Err(AppError::validation(
                "report.utc_offset_minutes is out of range",
            ));
        }
        Ok(())
    }
}

/// Remote API and HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the BuzzStream REST API
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Page size for the website listing
    #[serde(default = "defaults::page_size")]
    pub page_size: usize,

    /// Page size for history paging
    #[serde(default = "defaults::page_size")]
    pub history_page_size: usize,

    /// `max_results` sent with the project listing
    #[serde(default = "defaults::page_size")]
    pub project_max_results: usize,

    /// Maximum concurrent outbound requests across the whole process
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            page_size: defaults::page_size(),
            history_page_size: defaults::page_size(),
            project_max_results: defaults::page_size(),
            max_concurrent: defaults::max_concurrent(),
        }
    }
}

/// Web server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "defaults::bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: defaults::bind(),
        }
    }
}

/// Report shaping settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Project name prefixes to list, in display order
    #[serde(default = "defaults::phases")]
    pub phases: Vec<String>,

    /// Fixed UTC offset for day boundaries and date strings.
    /// Absent means the process-local time zone.
    #[serde(default)]
    pub utc_offset_minutes: Option<i32>,
}

impl ReportConfig {
    /// Resolve the configured time zone; `None` when the offset is invalid.
    pub fn zone(&self) -> Option<ReportZone> {
        match self.utc_offset_minutes {
            None => Some(ReportZone::Local),
            Some(minutes) => FixedOffset::east_opt(minutes.checked_mul(60)?).map(ReportZone::Fixed),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            phases: defaults::phases(),
            utc_offset_minutes: None,
        }
    }
}

/// Time zone used to cut calendar days and render dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportZone {
    Local,
    Fixed(FixedOffset),
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

/// Static OAuth consumer key pair.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .finish()
    }
}

mod defaults {
    pub fn base_url() -> String {
        "https://api.buzzstream.com/v1".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; buzzreport/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn page_size() -> usize {
        200
    }
    pub fn max_concurrent() -> usize {
        30
    }
    pub fn bind() -> String {
        "127.0.0.1:5000".into()
    }
    pub fn phases() -> Vec<String> {
        ["Phase 1", "Phase 3", "Phase 5", "Phase 8"]
            .into_iter()
            .map(String::from)
            .collect()
    }
    pub fn log_level() -> String {
        "info".into()
    }
}
