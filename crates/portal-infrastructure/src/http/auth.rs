use super::client::ApiClient;
use async_trait::async_trait;
use portal_core::session::{
    ApiError, AuthApi, AuthResponse, LoginRequest, LogoutAck, RegisterRequest,
};
use portal_core::user::SessionToken;
use std::sync::Arc;

/// [`AuthApi`] over `POST /auth/{login,register,logout}`.
#[derive(Debug, Clone)]
pub struct HttpAuthApi {
    client: Arc<ApiClient>,
}

impl HttpAuthApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.client.post(&["auth", "login"], request).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.client.post(&["auth", "register"], request).await
    }

    async fn logout(&self) -> Result<LogoutAck, ApiError> {
        self.client.post_empty(&["auth", "logout"]).await
    }

    fn set_bearer(&self, token: Option<SessionToken>) {
        self.client.set_bearer(token);
    }
}
