use crate::domain::entities::{Credentials, Session};
use crate::domain::ports::auth_gateway::AuthGateway;
use crate::domain::ports::session_store::{SessionStore, SessionStoreError};
use crate::infrastructure::http::error::ApiError;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),

    #[error("{}", .0.as_deref().unwrap_or("Invalid email or password"))]
    InvalidCredentials(Option<String>),

    #[error("You don't have permission to access this system")]
    Forbidden,

    #[error("Could not reach the server: {0}")]
    Unavailable(String),

    #[error("Login response did not include a token")]
    MissingToken,

    #[error(transparent)]
    Storage(#[from] SessionStoreError),
}

/// Sign-in gate of the back-office.
#[derive(Clone)]
pub struct AuthService {
    gateway: Arc<dyn AuthGateway>,
    store: Arc<dyn SessionStore>,
}

impl AuthService {
    pub fn new(gateway: Arc<dyn AuthGateway>, store: Arc<dyn SessionStore>) -> Self {
        Self { gateway, store }
    }

    /// Sign in with email and password. Only admins and managers get a
    /// session; the session is persisted for later runs.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::Validation(
                "Email and password are required".to_string(),
            ));
        }

        let credentials = Credentials {
            email: email.trim().to_string(),
            password: password.to_string(),
        };

        let response = self.gateway.login(&credentials).await.map_err(|e| {
            tracing::warn!("Login failed for {}: {}", credentials.email, e);
            match e {
                ApiError::Status { message, .. } | ApiError::Unauthorized { message } => {
                    AuthError::InvalidCredentials(message)
                }
                other => AuthError::Unavailable(other.to_string()),
            }
        })?;

        if !response.user.role.can_sign_in() {
            tracing::warn!(
                "Sign-in refused for {} with role {}",
                credentials.email,
                response.user.role
            );
            return Err(AuthError::Forbidden);
        }

        let token = response
            .token
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::MissingToken)?;

        let session = Session::new(token, response.user);
        self.store.save(&session).await?;
        tracing::info!(
            "Signed in as {} ({})",
            session.user.email,
            session.user.role
        );

        Ok(session)
    }

    /// The session saved by an earlier login, if any.
    pub async fn restore(&self) -> Result<Option<Session>, AuthError> {
        Ok(self.store.load().await?)
    }

    pub async fn logout(&self) -> Result<(), AuthError> {
        self.store.clear().await?;
        tracing::info!("Signed out");
        Ok(())
    }
}
