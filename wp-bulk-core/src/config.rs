//! Run configuration
//!
//! Built once at startup and passed by reference to every component. Nothing
//! in the worker path reads the environment.

use crate::error::{Error, Result};
use reqwest::Url;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default WordPress posts collection endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://www.example.com/wp-json/wp/v2/posts";

/// Default number of concurrent requests.
pub const DEFAULT_POOL_SIZE: usize = 8;

/// Default number of identifiers per submission batch.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: f64 = 10.0;

/// HTTP basic-auth credentials
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Password with every character replaced by `*`
    pub fn masked_password(&self) -> String {
        "*".repeat(self.password.chars().count())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &self.masked_password())
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub endpoint: Url,
    pub credentials: Option<Credentials>,
    pub pool_size: usize,
    pub batch_size: usize,
    pub timeout: Duration,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
}

impl RunConfig {
    /// Create a configuration with default tuning and a generated output path
    pub fn new(endpoint: &str, input_path: impl Into<PathBuf>) -> Result<Self> {
        let config = Self {
            endpoint: parse_endpoint(endpoint)?,
            credentials: None,
            pool_size: DEFAULT_POOL_SIZE,
            batch_size: DEFAULT_BATCH_SIZE,
            timeout: Duration::from_secs_f64(DEFAULT_TIMEOUT_SECS),
            input_path: input_path.into(),
            output_path: default_status_path(),
        };
        Ok(config)
    }

    pub fn with_credentials(mut self, credentials: Option<Credentials>) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn with_pool_size(mut self, pool_size: usize) -> Self {
        self.pool_size = pool_size;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_output_path(mut self, output_path: impl Into<PathBuf>) -> Self {
        self.output_path = output_path.into();
        self
    }

    /// Reject settings that would stall or misdirect a run
    pub fn validate(&self) -> Result<()> {
        if self.pool_size == 0 {
            return Err(Error::config("pool size must be at least 1"));
        }
        if self.batch_size == 0 {
            return Err(Error::config("batch size must be at least 1"));
        }
        if self.timeout.is_zero() {
            return Err(Error::config("timeout must be greater than zero"));
        }
        Ok(())
    }

    /// Log every setting, masking the password
    pub fn log_summary(&self) {
        tracing::info!("Input file: {}", display_path(&self.input_path));
        tracing::info!("Endpoint: {}", self.endpoint);
        tracing::info!("Pool size: {}", self.pool_size);
        tracing::info!("Batch size: {}", self.batch_size);
        match &self.credentials {
            Some(credentials) => {
                tracing::info!("Username: {}", credentials.username);
                tracing::info!("Password: {}", credentials.masked_password());
            }
            None => tracing::info!("Credentials: none"),
        }
        tracing::info!("Output file: {}", display_path(&self.output_path));
        tracing::info!("Timeout: {:?}", self.timeout);
    }
}

/// Parse a timeout given in (possibly fractional) seconds
pub fn timeout_from_secs(secs: f64) -> Result<Duration> {
    if !secs.is_finite() || secs <= 0.0 {
        return Err(Error::config(format!(
            "timeout must be a positive number of seconds, got {secs}"
        )));
    }
    Duration::try_from_secs_f64(secs)
        .map_err(|e| Error::config(format!("timeout of {secs} seconds is out of range: {e}")))
}

/// `<tmp>/wp_deletion_status_<8 chars>.jsonl`
pub fn default_status_path() -> PathBuf {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    std::env::temp_dir().join(format!("wp_deletion_status_{}.jsonl", &suffix[..8]))
}

fn parse_endpoint(endpoint: &str) -> Result<Url> {
    let url = Url::parse(endpoint)
        .map_err(|e| Error::config(format!("invalid endpoint '{endpoint}': {e}")))?;

    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(Error::config(format!(
            "endpoint must be an http(s) URL, got '{endpoint}'"
        )));
    }

    Ok(url)
}

fn display_path(path: &Path) -> String {
    std::path::absolute(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}
