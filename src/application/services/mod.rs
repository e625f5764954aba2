pub mod attachment_policy;
pub mod auth_service;
pub mod entity_workflow;

pub use attachment_policy::{AttachmentPolicy, DEFAULT_MAX_IMAGE_BYTES};
pub use auth_service::{AuthError, AuthService};
pub use entity_workflow::{DeleteOutcome, EntityWorkflow, UpdateOutcome};
