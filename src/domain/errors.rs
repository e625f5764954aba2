use crate::domain::entities::RecordId;
use thiserror::Error;

/// Shown when the server gives no message of its own.
pub const GENERIC_FAILURE: &str = "Something went wrong";

/// Local, pre-network rejection of a form field or attachment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Every way a screen operation can fail. `Option<String>` details carry the
/// server's `message` when it sent one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Create failed: {}", .0.as_deref().unwrap_or(GENERIC_FAILURE))]
    CreateFailed(Option<String>),

    /// Upload failed after the record was created; the record was removed again.
    #[error("Image upload failed, {kind} not created")]
    AttachmentFailed {
        kind: &'static str,
        id: RecordId,
        detail: Option<String>,
    },

    /// Upload failed and removing the just-created record failed too, so the
    /// record is still on the server without its image.
    #[error("Image upload failed and {kind} {id} could not be removed")]
    CompensationFailed {
        kind: &'static str,
        id: RecordId,
        detail: Option<String>,
    },

    #[error("Update failed: {}", .0.as_deref().unwrap_or(GENERIC_FAILURE))]
    UpdateFailed(Option<String>),

    #[error("Delete failed: {}", .0.as_deref().unwrap_or(GENERIC_FAILURE))]
    DeleteFailed(Option<String>),

    #[error("Refresh failed: {}", .0.as_deref().unwrap_or(GENERIC_FAILURE))]
    RefreshFailed(Option<String>),
}

impl WorkflowError {
    /// Text for the operator-facing notification.
    pub fn user_message(&self) -> String {
        match self {
            WorkflowError::Validation(e) => e.message.clone(),
            WorkflowError::CreateFailed(detail)
            | WorkflowError::UpdateFailed(detail)
            | WorkflowError::DeleteFailed(detail)
            | WorkflowError::RefreshFailed(detail) => detail
                .clone()
                .unwrap_or_else(|| GENERIC_FAILURE.to_string()),
            WorkflowError::AttachmentFailed { kind, .. } => {
                format!("Image upload failed, {} was not created", kind)
            }
            WorkflowError::CompensationFailed { kind, id, .. } => format!(
                "Image upload failed and the new {} (id {}) could not be removed. Delete it manually.",
                kind, id
            ),
        }
    }

    /// Whether the server may now hold state the screen has not seen yet.
    pub fn leaves_server_changed(&self) -> bool {
        matches!(self, WorkflowError::CompensationFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_surfaces_verbatim() {
        let err = WorkflowError::CreateFailed(Some("Pet name already exists".to_string()));
        assert_eq!(err.user_message(), "Pet name already exists");
        assert_eq!(err.to_string(), "Create failed: Pet name already exists");
    }

    #[test]
    fn test_generic_fallback() {
        let err = WorkflowError::RefreshFailed(None);
        assert_eq!(err.user_message(), GENERIC_FAILURE);
    }

    #[test]
    fn test_attachment_failure_distinct_from_create_failure() {
        let err = WorkflowError::AttachmentFailed {
            kind: "pet",
            id: RecordId::from("p1"),
            detail: None,
        };
        assert_eq!(err.user_message(), "Image upload failed, pet was not created");
        assert!(!err.leaves_server_changed());
    }

    #[test]
    fn test_compensation_failure_names_orphan() {
        let err = WorkflowError::CompensationFailed {
            kind: "vlog",
            id: RecordId::from(9),
            detail: Some("timeout".to_string()),
        };
        assert!(err.user_message().contains("id 9"));
        assert!(err.leaves_server_changed());
    }
}
