use crate::domain::entities::{PendingAttachment, RecordId, Session};
use crate::infrastructure::http::error::ApiResult;
use async_trait::async_trait;

#[async_trait]
pub trait AttachmentGateway: Send + Sync {
    /// Upload `attachment` as the image of record `id`, `POST {base_path}/{id}`.
    async fn upload_image(
        &self,
        session: &Session,
        base_path: &str,
        id: &RecordId,
        attachment: &PendingAttachment,
    ) -> ApiResult<()>;
}
