//! Client-wide configuration.

use std::env;
use std::fmt;
use std::time::Duration;

use crate::error::{Error, Result};

pub const API_KEY_ENV: &str = "MERGE_API_KEY";
pub const ACCOUNT_TOKEN_ENV: &str = "MERGE_ACCOUNT_TOKEN";
pub const API_URL_ENV: &str = "MERGE_API_URL";

const USER_AGENT: &str = concat!("merge-api-rust/", env!("CARGO_PKG_VERSION"));

/// Hosted API regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Production,
    Sandbox,
    ProductionEu,
}

impl Environment {
    pub fn base_url(self) -> &'static str {
        match self {
            Self::Production => "https://api.merge.dev",
            Self::Sandbox => "https://api-sandbox.merge.dev",
            Self::ProductionEu => "https://api-eu.merge.dev",
        }
    }
}

#[derive(Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: String,
    /// Scopes requests to one linked account.
    pub account_token: Option<String>,
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: Environment::default().base_url().to_string(),
            api_key: api_key.into(),
            account_token: None,
            timeout: None,
            user_agent: USER_AGENT.to_string(),
        }
    }

    /// Reads `MERGE_API_KEY` (required), `MERGE_ACCOUNT_TOKEN` and
    /// `MERGE_API_URL`.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var(API_KEY_ENV)
            .map_err(|_| Error::Config(format!("{API_KEY_ENV} missing")))?;
        let mut config = Self::new(api_key);
        if let Ok(token) = env::var(ACCOUNT_TOKEN_ENV) {
            config.account_token = Some(token);
        }
        if let Ok(url) = env::var(API_URL_ENV) {
            config.base_url = url;
        }
        Ok(config)
    }

    pub fn environment(mut self, environment: Environment) -> Self {
        self.base_url = environment.base_url().to_string();
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn account_token(mut self, token: impl Into<String>) -> Self {
        self.account_token = Some(token.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("account_token", &self.account_token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
