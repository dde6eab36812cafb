use serde::{Deserialize, Serialize};
use std::env;
use std::fmt::Debug;
use std::str::FromStr;
use tracing::{debug, error};

use crate::errors::CoreError;

/// Environment variable holding the backend base URL.
pub const API_URL_ENV: &str = "FUNDSCOPE_API_URL";

/// Environment variable holding the request timeout in seconds.
pub const TIMEOUT_ENV: &str = "FUNDSCOPE_TIMEOUT_SECS";

/// Backend used when nothing is configured (local development server).
pub const DEFAULT_BASE_URL: &str = "http://localhost:3002";

pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

pub const USER_AGENT: &str = concat!("fundscope-core/", env!("CARGO_PKG_VERSION"));

/// Connection settings for the fund backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL without a trailing slash, e.g. `http://localhost:3002`
    pub base_url: String,
    /// Whole-request timeout applied to every call
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Config pointing at an explicit backend, default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: trim_base_url(&base_url.into()),
            ..Self::default()
        }
    }

    /// Read configuration from the process environment.
    ///
    /// A `.env` file in the working directory is loaded first when present.
    /// Missing variables fall back to [`DEFAULT_BASE_URL`] and
    /// [`DEFAULT_TIMEOUT_SECS`].
    pub fn from_env() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            debug!("Loaded environment from {}", path.display());
        }

        let base_url = env::var(API_URL_ENV)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Self {
            base_url: trim_base_url(&base_url),
            timeout_secs: get_env_or_default(TIMEOUT_ENV, DEFAULT_TIMEOUT_SECS),
            user_agent: USER_AGENT.to_string(),
        }
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Reject configurations that can never produce a working client.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(CoreError::Config(format!(
                "Base URL '{}' must start with http:// or https://",
                self.base_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(CoreError::Config("Timeout must be at least 1 second".into()));
        }
        Ok(())
    }

    /// Join an endpoint path onto the base URL.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn trim_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// Gets an environment variable or returns a default value if not found or cannot be parsed
pub fn get_env_or_default<T: FromStr>(env_var: &str, default: T) -> T
where
    <T as FromStr>::Err: Debug,
{
    match env::var(env_var) {
        Ok(val) => val.trim().parse::<T>().unwrap_or_else(|_| {
            error!("Failed to parse {}: {}, using default", env_var, val);
            default
        }),
        Err(_) => default,
    }
}
