use crate::domain::entities::{EntityKind, RecordId, Session};
use crate::infrastructure::http::error::ApiResult;
use async_trait::async_trait;

/// CRUD calls of one entity kind against the REST API.
#[async_trait]
pub trait RecordGateway<K: EntityKind>: Send + Sync {
    async fn list(&self, session: &Session) -> ApiResult<Vec<K::Record>>;

    /// Returns the id the server assigned to the new record.
    async fn create(&self, session: &Session, draft: &K::Draft) -> ApiResult<RecordId>;

    async fn update(&self, session: &Session, changes: &K::Changes) -> ApiResult<()>;

    async fn delete(&self, session: &Session, id: &RecordId) -> ApiResult<()>;
}
