//! Shared REST client for the StudyPortal backend.

use portal_core::config::ApiSettings;
use portal_core::error::{PortalError, Result};
use portal_core::session::ApiError;
use portal_core::user::SessionToken;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{Method, RequestBuilder, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::RwLock;
use std::time::Duration;

/// JSON-over-HTTP client every API adapter goes through.
///
/// Holds one cookie jar for the process so a session cookie set by the
/// backend rides along on later calls. A bearer installed with
/// [`ApiClient::set_bearer`] is attached to every request as
/// `Authorization: Bearer <token>`.
#[derive(Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    bearer: RwLock<Option<SessionToken>>,
}

impl ApiClient {
    pub fn new(settings: &ApiSettings) -> Result<Self> {
        let base_url = Url::parse(&settings.base_url).map_err(|e| {
            PortalError::config(format!("Invalid API base URL '{}': {}", settings.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(PortalError::config(format!(
                "API base URL '{}' cannot carry a path",
                settings.base_url
            )));
        }

        let mut builder = reqwest::Client::builder().cookie_store(true);
        if settings.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(settings.timeout_secs));
        }
        let http = builder
            .build()
            .map_err(|e| PortalError::internal(format!("Failed to create HTTP client: {}", e)))?;

        tracing::debug!(base_url = %base_url, "Created API client");

        Ok(Self {
            http,
            base_url,
            bearer: RwLock::new(None),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn set_bearer(&self, token: Option<SessionToken>) {
        let mut bearer = self.bearer.write().unwrap_or_else(|e| e.into_inner());
        *bearer = token.filter(|t| !t.is_empty());
    }

    pub fn has_bearer(&self) -> bool {
        self.bearer
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    /// Resolves `segments` under the base URL, percent-encoding each one.
    pub fn endpoint(&self, segments: &[&str]) -> std::result::Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Transport(format!("Cannot extend URL {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub async fn get<T>(&self, segments: &[&str]) -> std::result::Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        self.send(Method::GET, url, |req| req).await
    }

    pub async fn post<T, B>(&self, segments: &[&str], body: &B) -> std::result::Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(segments)?;
        self.send(Method::POST, url, |req| req.json(body)).await
    }

    /// POST with no payload.
    pub async fn post_empty<T>(&self, segments: &[&str]) -> std::result::Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        self.send(Method::POST, url, |req| req).await
    }

    async fn send<T, F>(&self, method: Method, url: Url, build: F) -> std::result::Result<T, ApiError>
    where
        T: DeserializeOwned,
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let path = url.path().to_string();
        let mut request = self
            .http
            .request(method.clone(), url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let bearer = self
            .bearer
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        if let Some(token) = bearer {
            request = request.bearer_auth(token.as_str());
        }

        let response = build(request).send().await.map_err(|e| {
            tracing::debug!(%method, %path, error = %e, "Request failed");
            ApiError::Transport(e.to_string())
        })?;

        let status = response.status();
        tracing::debug!(%method, %path, status = status.as_u16(), "Response received");

        if !status.is_success() {
            let message = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|body| body.get("message")?.as_str().map(str::to_string));
            return Err(ApiError::rejected(status.as_u16(), message));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }
}
