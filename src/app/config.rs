//! Runtime configuration for the client. Values come from CLI flags or their
//! environment fallbacks; the session cookie is the only secret and stays
//! wrapped in `SecretString`.

use crate::api::AppError;
use secrecy::SecretString;
use std::time::Duration;
use url::Url;

/// Request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// Pause between a post-creation navigation and clearing creation state.
pub const DEFAULT_GRACE_DELAY_MS: u64 = 100;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_base_url: String,
    pub session_cookie: Option<SecretString>,
    pub request_timeout: Duration,
    pub grace_delay: Duration,
}

impl AppConfig {
    /// Builds a config, trimming inputs and rejecting non-HTTP base URLs.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the base URL is missing or invalid.
    pub fn new(
        api_base_url: &str,
        session_cookie: Option<&str>,
        timeout_secs: u64,
        grace_delay_ms: u64,
    ) -> Result<Self, AppError> {
        let api_base_url = normalize_value(api_base_url)
            .ok_or_else(|| AppError::Config("API URL must not be empty".to_string()))?;

        let url = Url::parse(&api_base_url)
            .map_err(|err| AppError::Config(format!("Invalid API URL: {err}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::Config(format!(
                "Unsupported API URL scheme: {}",
                url.scheme()
            )));
        }

        Ok(Self {
            api_base_url,
            session_cookie: session_cookie
                .and_then(normalize_value)
                .map(SecretString::from),
            request_timeout: Duration::from_secs(timeout_secs.max(1)),
            grace_delay: Duration::from_millis(grace_delay_ms),
        })
    }
}

fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn normalize_value_trims_and_rejects_empty() {
        assert_eq!(normalize_value(""), None);
        assert_eq!(normalize_value("   "), None);
        assert_eq!(
            normalize_value("  https://api.coursegen.dev "),
            Some("https://api.coursegen.dev".to_string())
        );
    }

    #[test]
    fn new_applies_defaults_and_trims_cookie() {
        let config = AppConfig::new(
            " https://api.coursegen.dev ",
            Some("  sid=abc "),
            DEFAULT_TIMEOUT_SECS,
            DEFAULT_GRACE_DELAY_MS,
        )
        .expect("valid config");

        assert_eq!(config.api_base_url, "https://api.coursegen.dev");
        assert_eq!(
            config.session_cookie.as_ref().map(|c| c.expose_secret().to_string()),
            Some("sid=abc".to_string())
        );
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.grace_delay, Duration::from_millis(100));
    }

    #[test]
    fn new_ignores_blank_cookie_and_clamps_timeout() {
        let config = AppConfig::new("http://localhost:3000", Some("  "), 0, 0).expect("valid");
        assert!(config.session_cookie.is_none());
        assert_eq!(config.request_timeout, Duration::from_secs(1));
        assert_eq!(config.grace_delay, Duration::ZERO);
    }

    #[test]
    fn new_rejects_bad_urls() {
        assert!(matches!(
            AppConfig::new("", None, 10, 100),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            AppConfig::new("localhost", None, 10, 100),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            AppConfig::new("ftp://files.test", None, 10, 100),
            Err(AppError::Config(_))
        ));
    }
}
