use crate::domain::entities::RecordId;
use crate::domain::errors::ValidationError;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// REST routes and wire field names of one entity kind.
#[derive(Debug, Clone, Copy)]
pub struct EntityRoutes {
    /// `GET` path returning `{ <collection_field>: [...] }`
    pub list: &'static str,
    pub collection_field: &'static str,
    /// `POST` path returning `{ <created_id_field>: <id> }`
    pub create: &'static str,
    pub created_id_field: &'static str,
    /// `PUT` path; the id travels in the body
    pub update: &'static str,
    /// `DELETE` path; body is `{ <delete_id_field>: <id> }`
    pub delete: &'static str,
    pub delete_id_field: &'static str,
    /// Multipart upload base, `POST {attachment_base}/{id}`. Kinds that have
    /// one require an image on create.
    pub attachment_base: Option<&'static str>,
}

/// An entity kind managed by one back-office screen.
///
/// `Form` is what the operator typed, unvalidated. `Draft` is the validated
/// create body and `Changes` the validated update body (which carries the id).
pub trait EntityKind: Send + Sync + 'static {
    type Record: DeserializeOwned + Clone + Send + Sync + 'static;
    type Form: Default + Clone + Send + Sync + 'static;
    type Draft: Serialize + Send + Sync + 'static;
    type Changes: Serialize + Send + Sync + 'static;

    /// Singular, lower-case name used in messages and metrics labels.
    const LABEL: &'static str;
    const PLURAL: &'static str;
    const ROUTES: EntityRoutes;

    fn record_id(record: &Self::Record) -> &RecordId;

    /// Prefill a form from an existing record (opening the update dialog).
    fn form_from(record: &Self::Record) -> Self::Form;

    fn validate_draft(form: &Self::Form) -> Result<Self::Draft, ValidationError>;

    fn validate_changes(
        id: &RecordId,
        form: &Self::Form,
    ) -> Result<Self::Changes, ValidationError>;
}

/// Trimmed value of a required text field.
pub(crate) fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(field, format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}
