// Configuration module: resolves the access token and endpoint URLs from
// the process environment once at startup. The resulting struct is passed
// around explicitly so the request code never reads the environment itself,
// which keeps the API client testable against a local mock server.

use anyhow::{Context, Result};
use std::env;

/// Default deposition host. Override with `DEPOSITION_URL` to target the
/// sandbox instance or a local mock.
pub const DEFAULT_BASE_URL: &str = "https://zenodo.org";

/// Runtime configuration for one invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the deposition API host.
    pub base_url: String,
    /// Storage bucket endpoint, when known up front. The UI prompts for it
    /// when this is `None`.
    pub bucket_url: Option<String>,
    /// Bearer token authorizing the API calls, scoped to one account.
    pub token: String,
}

impl Config {
    /// Read configuration from the environment. `ACCESS_TOKEN` is required;
    /// every call the client makes carries it, so a missing token fails the
    /// run before any request goes out.
    pub fn from_env() -> Result<Self> {
        let token = env::var("ACCESS_TOKEN").context("ACCESS_TOKEN is not set")?;
        let base_url = env::var("DEPOSITION_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        let bucket_url = env::var("BUCKET_URL").ok();
        Ok(Config {
            base_url,
            bucket_url,
            token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test covers both the missing and the present token case: the
    // ACCESS_TOKEN mutations must not race across parallel test threads.
    #[test]
    fn from_env_requires_access_token() {
        env::remove_var("ACCESS_TOKEN");
        env::remove_var("DEPOSITION_URL");
        env::remove_var("BUCKET_URL");
        assert!(Config::from_env().is_err());

        env::set_var("ACCESS_TOKEN", "abc123");
        let cfg = Config::from_env().unwrap();
        assert_eq!(cfg.token, "abc123");
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert!(cfg.bucket_url.is_none());
        env::remove_var("ACCESS_TOKEN");
    }
}
