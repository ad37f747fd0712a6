// Configuration: command line flags (with environment fallbacks) and the
// validated `ClientConfig` handed to the HTTP client and the session.

use crate::model::CarId;
use clap::Parser;
use reqwest::Url;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/";
pub const DEFAULT_RESOURCE: &str = "cars";
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("resource name must be a non-empty path segment, got {0:?}")]
    InvalidResource(String),

    #[error("max attempts must be at least 1")]
    ZeroAttempts,

    #[error("timeout must be at least 1 second")]
    ZeroTimeout,
}

/// Terminal client for the Vintage Cars database.
#[derive(Parser, Debug, Clone)]
#[command(name = "vintage-cars", version)]
pub struct Cli {
    /// Root URL of the cars server
    #[arg(long, env = "CARS_API_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Name of the collection under the root URL
    #[arg(long, env = "CARS_RESOURCE", default_value = DEFAULT_RESOURCE)]
    pub resource: String,

    /// Invalid answers accepted per field before the operation is cancelled
    #[arg(long, env = "CARS_MAX_ATTEMPTS", default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,

    /// Request timeout in seconds (no timeout when omitted)
    #[arg(long, env = "CARS_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Disable coloured diagnostics
    #[arg(long)]
    pub no_color: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn client_config(&self) -> Result<ClientConfig, ConfigError> {
        let config = ClientConfig::new(&self.base_url, &self.resource, self.max_attempts)?;
        match self.timeout {
            Some(secs) => config.with_timeout(Duration::from_secs(secs)),
            None => Ok(config),
        }
    }

    /// Default log filter when `RUST_LOG` is not set.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

/// Everything the client needs to know about the server, fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    resource: String,
    pub max_attempts: u32,
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(base_url: &str, resource: &str, max_attempts: u32) -> Result<Self, ConfigError> {
        let mut base_url = base_url.trim().to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        let parsed = Url::parse(&base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: base_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl {
                url: base_url,
                reason: "scheme must be http or https".into(),
            });
        }

        let resource = resource.trim().trim_matches('/');
        if resource.is_empty() || resource.contains(char::is_whitespace) {
            return Err(ConfigError::InvalidResource(resource.to_string()));
        }
        if max_attempts == 0 {
            return Err(ConfigError::ZeroAttempts);
        }

        Ok(ClientConfig {
            base_url,
            resource: resource.to_string(),
            max_attempts,
            timeout: None,
        })
    }

    /// A zero timeout would fail every request, the connectivity check first.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, ConfigError> {
        if timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        self.timeout = Some(timeout);
        Ok(self)
    }

    /// Server root, always ending in `/`. Probed before every menu.
    pub fn root_url(&self) -> &str {
        &self.base_url
    }

    pub fn collection_url(&self) -> String {
        format!("{}{}/", self.base_url, self.resource)
    }

    pub fn item_url(&self, id: CarId) -> String {
        format!("{}{}/{}", self.base_url, self.resource, id)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            resource: DEFAULT_RESOURCE.to_string(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            timeout: None,
        }
    }
}
