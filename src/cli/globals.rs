use crate::app::config::AppConfig;
use anyhow::Result;
use secrecy::{ExposeSecret, SecretString};

#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub api_url: String,
    pub session_cookie: Option<SecretString>,
    pub timeout_secs: u64,
    pub grace_delay_ms: u64,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(api_url: String) -> Self {
        Self {
            api_url,
            session_cookie: None,
            timeout_secs: crate::app::config::DEFAULT_TIMEOUT_SECS,
            grace_delay_ms: crate::app::config::DEFAULT_GRACE_DELAY_MS,
        }
    }

    pub fn set_session_cookie(&mut self, cookie: SecretString) {
        self.session_cookie = Some(cookie);
    }

    /// # Errors
    ///
    /// Returns an error if the API URL is invalid.
    pub fn to_config(&self) -> Result<AppConfig> {
        Ok(AppConfig::new(
            &self.api_url,
            self.session_cookie.as_ref().map(|cookie| cookie.expose_secret()),
            self.timeout_secs,
            self.grace_delay_ms,
        )?)
    }
}
