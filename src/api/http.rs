//! HTTP helpers for JSON APIs with consistent timeouts and error handling.
//! Collaborator clients use these helpers so every request carries the same
//! user agent, request id and error mapping. Session cookies are attached by
//! the underlying client; they are never logged here.

use super::errors::AppError;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};
use ulid::Ulid;

/// Maximum number of error body characters surfaced to the UI.
const MAX_ERROR_CHARS: usize = 200;

/// Header carrying a per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

#[derive(Clone, Debug)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    #[must_use]
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        }
    }

    /// Fetches JSON and fails on any non-2xx status.
    #[instrument(skip(self))]
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let response = self.send(self.client.get(build_url(&self.base_url, path))).await?;
        handle_json_response(response).await
    }

    /// Fetches JSON and returns `None` on 204 or 401.
    #[instrument(skip(self))]
    pub async fn get_optional_json<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Option<T>, AppError> {
        let response = self.send(self.client.get(build_url(&self.base_url, path))).await?;
        handle_optional_json_response(response).await
    }

    /// Posts JSON and parses a JSON response.
    #[instrument(skip(self, body))]
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let payload = serde_json::to_vec(body)
            .map_err(|err| AppError::Serialization(format!("Failed to encode request: {err}")))?;
        let request = self
            .client
            .post(build_url(&self.base_url, path))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(payload);
        let response = self.send(request).await?;
        handle_json_response(response).await
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Response, AppError> {
        let request_id = Ulid::new().to_string();
        debug!(request_id = %request_id, "sending request");
        request
            .header(REQUEST_ID_HEADER, request_id)
            .send()
            .await
            .map_err(map_request_error)
    }
}

/// Builds a URL from an explicit base URL and the provided path.
pub(crate) fn build_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

/// Maps transport errors into user-facing `AppError` variants.
fn map_request_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::Timeout("Request timed out. Please try again.".to_string())
    } else if err.is_builder() {
        AppError::Config(format!("Failed to build request: {err}"))
    } else {
        AppError::Network(format!("Unable to reach the server: {err}"))
    }
}

async fn handle_json_response<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    if response.status().is_success() {
        response
            .json::<T>()
            .await
            .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
    } else {
        Err(http_error(response).await)
    }
}

async fn handle_optional_json_response<T: DeserializeOwned>(
    response: Response,
) -> Result<Option<T>, AppError> {
    match response.status() {
        StatusCode::NO_CONTENT | StatusCode::UNAUTHORIZED => Ok(None),
        status if status.is_success() => response
            .json::<T>()
            .await
            .map(Some)
            .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}"))),
        _ => Err(http_error(response).await),
    }
}

async fn http_error(response: Response) -> AppError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    AppError::Http {
        status,
        message: error_message(&body),
    }
}

/// Prefers the `error` or `message` field of a JSON body, then the raw text.
fn error_message(body: &str) -> String {
    let from_json = serde_json::from_str::<Value>(body).ok().and_then(|value| {
        ["error", "message"]
            .iter()
            .find_map(|key| value.get(*key).and_then(Value::as_str).map(str::to_string))
    });
    sanitize_body(from_json.as_deref().unwrap_or(body))
}

/// Sanitizes HTTP error bodies for user-facing messages by trimming and truncating.
fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_url_joins_base_and_path() {
        assert_eq!(
            build_url("https://api.test/", "/auth/session"),
            "https://api.test/auth/session"
        );
        assert_eq!(build_url("  ", "/lessons"), "/lessons");
        assert_eq!(
            build_url("https://api.test/v1", "modules/generate"),
            "https://api.test/v1/modules/generate"
        );
    }

    #[test]
    fn sanitize_body_trims_and_truncates() {
        assert_eq!(sanitize_body("   "), "Request failed.");
        assert_eq!(sanitize_body("  boom \n"), "boom");
        let long = "x".repeat(500);
        assert_eq!(sanitize_body(&long).len(), MAX_ERROR_CHARS);
    }

    #[test]
    fn error_message_prefers_json_fields() {
        assert_eq!(
            error_message(r#"{"error":"Prompt is too vague"}"#),
            "Prompt is too vague"
        );
        assert_eq!(
            error_message(r#"{"message":"quota exceeded","code":7}"#),
            "quota exceeded"
        );
        assert_eq!(error_message(r#"{"code":7}"#), r#"{"code":7}"#);
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn http_client_normalizes_base_url() {
        let http = HttpClient::new(Client::new(), " https://api.test/ ");
        assert_eq!(http.base_url, "https://api.test");
    }
}
