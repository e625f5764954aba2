use crate::application::services::attachment_policy::AttachmentPolicy;
use crate::domain::entities::{ConfirmPrompt, EntityKind, PendingAttachment, RecordId, Session};
use crate::domain::errors::{ValidationError, WorkflowError};
use crate::domain::ports::attachment_gateway::AttachmentGateway;
use crate::domain::ports::dialogs::Confirmer;
use crate::domain::ports::record_gateway::RecordGateway;
use crate::infrastructure::http::error::ApiError;
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    /// Fields were saved but the replacement image was not.
    PartiallyUpdated { detail: Option<String> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The operator said no; nothing was sent.
    Declined,
}

/// Result of the single upload attempt made by a workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
enum UploadStatus {
    Uploaded,
    Failed(Option<String>),
}

/// Create/update/delete/list of one entity kind.
///
/// Every operation is a fixed sequence of awaited remote steps; nothing runs
/// in parallel and nothing is retried.
pub struct EntityWorkflow<K: EntityKind> {
    records: Arc<dyn RecordGateway<K>>,
    attachments: Arc<dyn AttachmentGateway>,
    policy: AttachmentPolicy,
}

impl<K: EntityKind> Clone for EntityWorkflow<K> {
    fn clone(&self) -> Self {
        Self {
            records: self.records.clone(),
            attachments: self.attachments.clone(),
            policy: self.policy,
        }
    }
}

fn detail(err: &ApiError) -> Option<String> {
    err.server_message().map(str::to_string)
}

fn record_outcome(kind: &'static str, op: &'static str, outcome: &'static str) {
    metrics::counter!(
        "petzone_workflow_total",
        "kind" => kind,
        "op" => op,
        "outcome" => outcome
    )
    .increment(1);
}

impl<K: EntityKind> EntityWorkflow<K> {
    pub fn new(
        records: Arc<dyn RecordGateway<K>>,
        attachments: Arc<dyn AttachmentGateway>,
        policy: AttachmentPolicy,
    ) -> Self {
        Self {
            records,
            attachments,
            policy,
        }
    }

    /// Create a record.
    ///
    /// Kinds with an image route need `attachment`: the record is created,
    /// the image uploaded against the returned id, and if the upload fails the
    /// record is deleted again so no image-less record is left behind.
    /// Kinds without an image route reject an attachment.
    pub async fn create(
        &self,
        session: &Session,
        form: &K::Form,
        attachment: Option<&PendingAttachment>,
    ) -> Result<RecordId, WorkflowError> {
        let result = match K::ROUTES.attachment_base {
            Some(base_path) => {
                self.create_with_attachment(session, form, base_path, attachment)
                    .await
            }
            None => self.create_plain(session, form, attachment).await,
        };

        record_outcome(
            K::LABEL,
            "create",
            if result.is_ok() { "success" } else { "failure" },
        );
        result
    }

    async fn create_plain(
        &self,
        session: &Session,
        form: &K::Form,
        attachment: Option<&PendingAttachment>,
    ) -> Result<RecordId, WorkflowError> {
        if attachment.is_some() {
            return Err(ValidationError::new(
                "image",
                format!("A {} does not take an image", K::LABEL),
            )
            .into());
        }
        let draft = K::validate_draft(form)?;

        self.create_record(session, &draft).await
    }

    async fn create_with_attachment(
        &self,
        session: &Session,
        form: &K::Form,
        base_path: &str,
        attachment: Option<&PendingAttachment>,
    ) -> Result<RecordId, WorkflowError> {
        // 1. validate, before anything leaves the process
        let draft = K::validate_draft(form)?;
        let attachment = self.policy.require(attachment)?;

        // 2. create
        let id = self.create_record(session, &draft).await?;

        // 3. upload, exactly once
        match self.try_upload(session, base_path, &id, attachment).await {
            UploadStatus::Uploaded => {
                info!(kind = K::LABEL, id = %id, "Created with image");
                Ok(id)
            }
            // 4. reconcile
            UploadStatus::Failed(upload_detail) => {
                Err(self.compensate(session, id, upload_detail).await)
            }
        }
    }

    async fn create_record(
        &self,
        session: &Session,
        draft: &K::Draft,
    ) -> Result<RecordId, WorkflowError> {
        match self.records.create(session, draft).await {
            Ok(id) => {
                info!(kind = K::LABEL, id = %id, "Record created");
                Ok(id)
            }
            Err(e) => {
                warn!(kind = K::LABEL, "Create failed: {}", e);
                Err(WorkflowError::CreateFailed(detail(&e)))
            }
        }
    }

    /// Upload the image, turning every failure into `UploadStatus::Failed`.
    async fn try_upload(
        &self,
        session: &Session,
        base_path: &str,
        id: &RecordId,
        attachment: &PendingAttachment,
    ) -> UploadStatus {
        match self
            .attachments
            .upload_image(session, base_path, id, attachment)
            .await
        {
            Ok(()) => UploadStatus::Uploaded,
            Err(e) => {
                warn!(kind = K::LABEL, id = %id, "Image upload failed: {}", e);
                UploadStatus::Failed(detail(&e).or_else(|| Some(e.to_string())))
            }
        }
    }

    /// Best-effort removal of a record whose image upload failed. Not retried.
    async fn compensate(
        &self,
        session: &Session,
        id: RecordId,
        upload_detail: Option<String>,
    ) -> WorkflowError {
        match self.records.delete(session, &id).await {
            Ok(()) => {
                info!(kind = K::LABEL, id = %id, "Rolled back record after failed image upload");
                metrics::counter!(
                    "petzone_compensations_total",
                    "kind" => K::LABEL,
                    "outcome" => "deleted"
                )
                .increment(1);
                WorkflowError::AttachmentFailed {
                    kind: K::LABEL,
                    id,
                    detail: upload_detail,
                }
            }
            Err(e) => {
                error!(
                    kind = K::LABEL,
                    id = %id,
                    "Rollback failed, record left without image: {}",
                    e
                );
                metrics::counter!(
                    "petzone_compensations_total",
                    "kind" => K::LABEL,
                    "outcome" => "failed"
                )
                .increment(1);
                WorkflowError::CompensationFailed {
                    kind: K::LABEL,
                    id,
                    detail: detail(&e).or_else(|| Some(e.to_string())),
                }
            }
        }
    }

    /// Update a record's fields, then optionally replace its image.
    ///
    /// A failed image upload does not undo the field update; it is reported
    /// as `UpdateOutcome::PartiallyUpdated`.
    pub async fn update(
        &self,
        session: &Session,
        id: &RecordId,
        form: &K::Form,
        attachment: Option<&PendingAttachment>,
    ) -> Result<UpdateOutcome, WorkflowError> {
        let changes = K::validate_changes(id, form)?;
        let image = match (K::ROUTES.attachment_base, attachment) {
            (_, None) => None,
            (Some(base_path), Some(attachment)) => {
                self.policy.validate(attachment)?;
                Some((base_path, attachment))
            }
            (None, Some(_)) => {
                return Err(ValidationError::new(
                    "image",
                    format!("A {} does not take an image", K::LABEL),
                )
                .into())
            }
        };

        if let Err(e) = self.records.update(session, &changes).await {
            warn!(kind = K::LABEL, id = %id, "Update failed: {}", e);
            record_outcome(K::LABEL, "update", "failure");
            return Err(WorkflowError::UpdateFailed(detail(&e)));
        }
        info!(kind = K::LABEL, id = %id, "Record updated");

        let outcome = match image {
            None => UpdateOutcome::Updated,
            Some((base_path, attachment)) => {
                match self.try_upload(session, base_path, id, attachment).await {
                    UploadStatus::Uploaded => UpdateOutcome::Updated,
                    UploadStatus::Failed(detail) => UpdateOutcome::PartiallyUpdated { detail },
                }
            }
        };

        record_outcome(
            K::LABEL,
            "update",
            match outcome {
                UpdateOutcome::Updated => "success",
                UpdateOutcome::PartiallyUpdated { .. } => "partial",
            },
        );
        Ok(outcome)
    }

    /// Delete a record once the operator confirms.
    pub async fn delete(
        &self,
        session: &Session,
        id: &RecordId,
        confirmer: &dyn Confirmer,
    ) -> Result<DeleteOutcome, WorkflowError> {
        if !confirmer.confirm(&ConfirmPrompt::delete()).await {
            return Ok(DeleteOutcome::Declined);
        }

        match self.records.delete(session, id).await {
            Ok(()) => {
                info!(kind = K::LABEL, id = %id, "Record deleted");
                record_outcome(K::LABEL, "delete", "success");
                Ok(DeleteOutcome::Deleted)
            }
            Err(e) => {
                warn!(kind = K::LABEL, id = %id, "Delete failed: {}", e);
                record_outcome(K::LABEL, "delete", "failure");
                Err(WorkflowError::DeleteFailed(detail(&e)))
            }
        }
    }

    /// Fetch the whole collection as the server has it now.
    pub async fn list(&self, session: &Session) -> Result<Vec<K::Record>, WorkflowError> {
        self.records.list(session).await.map_err(|e| {
            warn!(kind = K::LABEL, "Refresh failed: {}", e);
            WorkflowError::RefreshFailed(detail(&e))
        })
    }
}
