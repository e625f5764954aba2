use crate::domain::entities::{Credentials, LoginResponse};
use crate::infrastructure::http::error::ApiResult;
use async_trait::async_trait;

#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> ApiResult<LoginResponse>;
}
