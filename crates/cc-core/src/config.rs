//! Client configuration

use crate::{CoreError, CoreResult, DEFAULT_ENDPOINT, VERIFY_PATH};
use url::Url;

/// Environment variable overriding the service address
pub const ENDPOINT_ENV: &str = "CREDICHECK_ENDPOINT";

/// Environment variable setting the request timeout in seconds
pub const TIMEOUT_ENV: &str = "CREDICHECK_TIMEOUT_SECS";

/// Configuration for talking to the verification service
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base address of the service
    pub endpoint: Url,
    /// Request timeout (seconds), none waits indefinitely
    pub timeout_secs: Option<u64>,
    /// User agent string
    pub user_agent: String,
}

impl ClientConfig {
    /// Build a configuration for the given base address
    pub fn new(endpoint: &str) -> CoreResult<Self> {
        Ok(Self {
            endpoint: parse_endpoint(endpoint)?,
            timeout_secs: None,
            user_agent: format!("CrediCheck/{}", env!("CARGO_PKG_VERSION")),
        })
    }

    /// Read the configuration from the environment, falling back to defaults
    pub fn from_env() -> CoreResult<Self> {
        Self::resolve(None, None, |key| std::env::var(key).ok())
    }

    /// Build a configuration where explicit values win over `lookup`
    ///
    /// `lookup` is only consulted for values left unset, so a bad
    /// environment variable does not matter once a flag replaces it.
    pub fn resolve<F>(endpoint: Option<&str>, timeout_secs: Option<u64>, lookup: F) -> CoreResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match endpoint {
            Some(endpoint) => Self::new(endpoint)?,
            None => Self::new(&lookup(ENDPOINT_ENV).unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()))?,
        };

        let timeout_secs = match timeout_secs {
            Some(secs) => Some(secs),
            None => lookup(TIMEOUT_ENV).map(|raw| parse_timeout(&raw)).transpose()?,
        };
        if let Some(secs) = timeout_secs {
            config = config.with_timeout(secs)?;
        }

        Ok(config)
    }

    /// Set the request timeout; zero is rejected
    pub fn with_timeout(mut self, secs: u64) -> CoreResult<Self> {
        if secs == 0 {
            return Err(CoreError::Config("timeout must be at least one second".to_string()));
        }
        self.timeout_secs = Some(secs);
        Ok(self)
    }

    /// Full URL of the verification route
    pub fn verify_url(&self) -> CoreResult<Url> {
        Ok(self.endpoint.join(VERIFY_PATH)?)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL"),
            timeout_secs: None,
            user_agent: format!("CrediCheck/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

fn parse_timeout(raw: &str) -> CoreResult<u64> {
    raw.trim().parse::<u64>().map_err(|_| {
        CoreError::Config(format!("{} must be a whole number of seconds: {:?}", TIMEOUT_ENV, raw))
    })
}

fn parse_endpoint(raw: &str) -> CoreResult<Url> {
    let url = Url::parse(raw.trim())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(CoreError::Config(format!(
            "endpoint must use http or https, got {}",
            other
        ))),
    }
}
