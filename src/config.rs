use serde::Deserialize;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;
pub const MIN_POLL_INTERVAL_SECS: u64 = 10;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    // Endpoints
    #[serde(default = "default_incidents_url")]
    pub incidents_url: String,
    #[serde(default = "default_components_url")]
    pub components_url: String,

    // HTTP
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    // Polling
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    #[serde(default)]
    pub announce_existing: bool,

    // Output
    #[serde(default = "default_product")]
    pub default_product: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

fn default_incidents_url() -> String {
    "https://status.openai.com/api/v2/incidents.json".to_string()
}

fn default_components_url() -> String {
    "https://status.openai.com/api/v2/components.json".to_string()
}

fn default_user_agent() -> String {
    "OpenAI-Status-Tracker/1.0".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_poll_interval_secs() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}

fn default_product() -> String {
    "OpenAI Services".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            incidents_url: default_incidents_url(),
            components_url: default_components_url(),
            user_agent: default_user_agent(),
            request_timeout_secs: default_request_timeout_secs(),
            poll_interval_secs: default_poll_interval_secs(),
            announce_existing: false,
            default_product: default_product(),
            log_format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::Environment::default().try_parsing(true))
            .build()?;
        config.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if !is_http_url(&self.incidents_url) {
            return Err("INCIDENTS_URL must be an http(s) URL".to_string());
        }
        if !is_http_url(&self.components_url) {
            return Err("COMPONENTS_URL must be an http(s) URL".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("REQUEST_TIMEOUT_SECS must be greater than zero".to_string());
        }
        if self.user_agent.trim().is_empty() {
            return Err("USER_AGENT cannot be empty".to_string());
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn is_http_url(raw: &str) -> bool {
    raw.starts_with("http://") || raw.starts_with("https://")
}

/// Delay between poll cycles. Never shorter than the minimum interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollInterval(Duration);

impl PollInterval {
    pub fn from_secs(secs: u64) -> Self {
        if secs < MIN_POLL_INTERVAL_SECS {
            warn!(
                "Poll interval too short, using minimum of {} seconds",
                MIN_POLL_INTERVAL_SECS
            );
            Self(Duration::from_secs(MIN_POLL_INTERVAL_SECS))
        } else {
            Self(Duration::from_secs(secs))
        }
    }

    #[cfg(test)]
    pub(crate) fn for_tests(interval: Duration) -> Self {
        Self(interval)
    }

    pub fn as_duration(&self) -> Duration {
        self.0
    }

    pub fn as_secs(&self) -> u64 {
        self.0.as_secs()
    }
}

/// Resolve the poll interval from the optional CLI argument, falling back to
/// the configured default.
pub fn resolve_poll_interval(arg: Option<&str>, configured_secs: u64) -> PollInterval {
    let secs = match arg.map(str::trim) {
        Some(raw) => match raw.parse::<u64>() {
            Ok(secs) => secs,
            Err(_) => {
                warn!(
                    "Invalid poll interval '{}', using default {} seconds",
                    raw, configured_secs
                );
                configured_secs
            }
        },
        None => configured_secs,
    };

    PollInterval::from_secs(secs)
}
