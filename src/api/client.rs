//! Client wrappers for the learning API. `ApiClient` is the production
//! implementation of the session and generation collaborators; routes and the
//! CLI only see it through those traits, plus the read-only listings.

use super::{
    errors::AppError,
    http::HttpClient,
    types::{
        CourseOutlineInput, CreatedCourseRef, CreatedModuleRef, CsrfTokenResponse, LessonSummary,
        ModuleInput, ReviewItem, SessionCheckResponse,
    },
};
use crate::{
    app::config::AppConfig,
    creation::{CourseOutlineGenerator, ModuleGenerator},
    session::AuthProbe,
    APP_USER_AGENT,
};
use async_trait::async_trait;
use reqwest::{cookie::Jar, Client};
use secrecy::ExposeSecret;
use std::sync::Arc;
use tracing::instrument;
use url::Url;

pub const CSRF_TOKEN_PATH: &str = "/csrf-token";
pub const SESSION_PATH: &str = "/auth/session";
pub const MODULE_GENERATE_PATH: &str = "/modules/generate";
pub const COURSE_GENERATE_PATH: &str = "/courses/generate";
pub const LESSONS_PATH: &str = "/lessons";
pub const DUE_REVIEWS_PATH: &str = "/reviews/due";

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: HttpClient,
}

impl ApiClient {
    /// Builds a client with a cookie jar seeded from the configured session
    /// cookie. The jar also keeps the CSRF cookie issued at bootstrap.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the base URL is invalid or the client
    /// cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let base = Url::parse(&config.api_base_url)
            .map_err(|err| AppError::Config(format!("Invalid API URL: {err}")))?;

        let jar = Jar::default();
        if let Some(cookie) = &config.session_cookie {
            jar.add_cookie_str(&format!("{}; Path=/", cookie.expose_secret()), &base);
        }

        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(config.request_timeout)
            .cookie_provider(Arc::new(jar))
            .build()
            .map_err(|err| AppError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            http: HttpClient::new(client, base.as_str()),
        })
    }

    /// Asks the server to set the CSRF cookie. The token itself is opaque.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn issue_csrf_token(&self) -> Result<bool, AppError> {
        let response: CsrfTokenResponse = self.http.get_json(CSRF_TOKEN_PATH).await?;
        Ok(response.success)
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn list_lessons(&self) -> Result<Vec<LessonSummary>, AppError> {
        self.http.get_json(LESSONS_PATH).await
    }

    /// Reviews the server considers due now.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn list_due_reviews(&self) -> Result<Vec<ReviewItem>, AppError> {
        self.http.get_json(DUE_REVIEWS_PATH).await
    }
}

#[async_trait]
impl AuthProbe for ApiClient {
    #[instrument(skip(self))]
    async fn check_session(&self) -> Result<bool, AppError> {
        let response: Option<SessionCheckResponse> =
            self.http.get_optional_json(SESSION_PATH).await?;
        Ok(response.is_some_and(|session| session.authenticated))
    }
}

#[async_trait]
impl ModuleGenerator for ApiClient {
    async fn create_module(&self, input: &ModuleInput) -> Result<CreatedModuleRef, AppError> {
        self.http.post_json(MODULE_GENERATE_PATH, input).await
    }
}

#[async_trait]
impl CourseOutlineGenerator for ApiClient {
    async fn create_course_outline(
        &self,
        input: &CourseOutlineInput,
    ) -> Result<CreatedCourseRef, AppError> {
        self.http.post_json(COURSE_GENERATE_PATH, input).await
    }
}
