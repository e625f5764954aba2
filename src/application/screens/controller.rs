use crate::application::services::entity_workflow::{
    DeleteOutcome, EntityWorkflow, UpdateOutcome,
};
use crate::domain::entities::{EntityKind, Notice, PendingAttachment, RecordId, Session};
use crate::domain::errors::{ValidationError, WorkflowError};
use crate::domain::ports::dialogs::{Confirmer, Notifier};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// What a screen shows: the last fetched rows plus loading / error banner.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenState<R> {
    pub rows: Vec<R>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<R> Default for ScreenState<R> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            loading: false,
            error: None,
        }
    }
}

/// Contents of the add/update dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState<F> {
    pub form: F,
    pub attachment: Option<PendingAttachment>,
    /// Set while the dialog edits an existing record.
    pub editing: Option<RecordId>,
}

impl<F: Default> Default for FormState<F> {
    fn default() -> Self {
        Self {
            form: F::default(),
            attachment: None,
            editing: None,
        }
    }
}

/// Clears the in-flight flag when the submission ends, however it ends.
struct SubmitGuard<'a>(&'a AtomicBool);

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// State and operations of one back-office screen.
///
/// Owns the rows, the form being edited and the pending image. Every
/// operation ends in a `Notice` to the notifier; nothing is returned as an
/// error. Methods take `&self` so a UI can share the controller.
pub struct ScreenController<K: EntityKind> {
    workflow: EntityWorkflow<K>,
    session: Session,
    notifier: Arc<dyn Notifier>,
    confirmer: Arc<dyn Confirmer>,
    state: RwLock<ScreenState<K::Record>>,
    draft: RwLock<FormState<K::Form>>,
    submitting: AtomicBool,
}

impl<K: EntityKind> ScreenController<K> {
    pub fn new(
        workflow: EntityWorkflow<K>,
        session: Session,
        notifier: Arc<dyn Notifier>,
        confirmer: Arc<dyn Confirmer>,
    ) -> Self {
        Self {
            workflow,
            session,
            notifier,
            confirmer,
            state: RwLock::new(ScreenState::default()),
            draft: RwLock::new(FormState::default()),
            submitting: AtomicBool::new(false),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub(crate) fn workflow(&self) -> &EntityWorkflow<K> {
        &self.workflow
    }

    pub(crate) fn notify(&self, notice: Notice) {
        self.notifier.notify(notice);
    }

    pub async fn snapshot(&self) -> ScreenState<K::Record> {
        self.state.read().await.clone()
    }

    pub async fn rows(&self) -> Vec<K::Record> {
        self.state.read().await.rows.clone()
    }

    pub async fn find(&self, id: &RecordId) -> Option<K::Record> {
        self.state
            .read()
            .await
            .rows
            .iter()
            .find(|record| K::record_id(record) == id)
            .cloned()
    }

    pub async fn form_state(&self) -> FormState<K::Form> {
        self.draft.read().await.clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    /// Replace the rows with the server's current collection.
    ///
    /// Concurrent refreshes are not coordinated: whichever answer lands last
    /// is what the screen shows. On failure the old rows stay.
    pub async fn refresh(&self) -> bool {
        self.state.write().await.loading = true;

        let result = self.workflow.list(&self.session).await;

        let mut state = self.state.write().await;
        state.loading = false;
        match result {
            Ok(rows) => {
                state.rows = rows;
                state.error = None;
                true
            }
            Err(e) => {
                let message = e.user_message();
                state.error = Some(message.clone());
                drop(state);
                self.notify(Notice::error(format!("Failed to load {}", K::PLURAL), message));
                false
            }
        }
    }

    pub async fn edit_form(&self, edit: impl FnOnce(&mut K::Form)) {
        edit(&mut self.draft.write().await.form);
    }

    /// Keep the picked image for the next submission and return its preview.
    pub async fn select_attachment(&self, attachment: PendingAttachment) -> String {
        let preview = attachment.preview_data_url();
        self.draft.write().await.attachment = Some(attachment);
        preview
    }

    pub async fn clear_attachment(&self) {
        self.draft.write().await.attachment = None;
    }

    /// Open the update dialog for `record`.
    pub async fn begin_update(&self, record: &K::Record) {
        let mut draft = self.draft.write().await;
        draft.form = K::form_from(record);
        draft.attachment = None;
        draft.editing = Some(K::record_id(record).clone());
    }

    pub async fn reset_form(&self) {
        *self.draft.write().await = FormState::default();
    }

    fn try_begin_submit(&self) -> Option<SubmitGuard<'_>> {
        match self
            .submitting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
        {
            Ok(_) => Some(SubmitGuard(&self.submitting)),
            Err(_) => {
                self.notify(Notice::warning(
                    "Please wait",
                    "The previous request is still in progress",
                ));
                None
            }
        }
    }

    fn notify_failure(&self, title: String, err: &WorkflowError) {
        let title = match err {
            WorkflowError::Validation(_) => "Validation Error".to_string(),
            _ => title,
        };
        self.notify(Notice::error(title, err.user_message()));
    }

    /// Submit the add dialog.
    pub async fn submit_create(&self) -> bool {
        let Some(_guard) = self.try_begin_submit() else {
            return false;
        };
        let draft = self.form_state().await;

        let result = self
            .workflow
            .create(&self.session, &draft.form, draft.attachment.as_ref())
            .await;

        match result {
            Ok(_) => {
                self.notify(Notice::success(
                    "Added!",
                    format!("New {} has been added successfully", K::LABEL),
                ));
                self.reset_form().await;
                self.refresh().await;
                true
            }
            Err(e) => {
                self.notify_failure(format!("Failed to add {}", K::LABEL), &e);
                if e.leaves_server_changed() {
                    self.refresh().await;
                }
                false
            }
        }
    }

    /// Submit the update dialog opened with `begin_update`.
    pub async fn submit_update(&self) -> bool {
        let Some(_guard) = self.try_begin_submit() else {
            return false;
        };
        let draft = self.form_state().await;

        let Some(id) = draft.editing.as_ref() else {
            let err = WorkflowError::from(ValidationError::new(
                "id",
                format!("No {} selected for update", K::LABEL),
            ));
            self.notify_failure(String::new(), &err);
            return false;
        };

        let result = self
            .workflow
            .update(&self.session, id, &draft.form, draft.attachment.as_ref())
            .await;

        match result {
            Ok(UpdateOutcome::Updated) => {
                self.notify(Notice::success(
                    "Updated!",
                    format!(
                        "{} information has been updated successfully",
                        capitalize(K::LABEL)
                    ),
                ));
            }
            Ok(UpdateOutcome::PartiallyUpdated { .. }) => {
                self.notify(Notice::warning(
                    "Partially updated",
                    format!(
                        "{} information was saved but the new image could not be uploaded",
                        capitalize(K::LABEL)
                    ),
                ));
            }
            Err(e) => {
                self.notify_failure(format!("Failed to update {}", K::LABEL), &e);
                return false;
            }
        }

        self.reset_form().await;
        self.refresh().await;
        true
    }

    /// Delete a record after asking the operator.
    pub async fn delete(&self, id: &RecordId) -> bool {
        match self
            .workflow
            .delete(&self.session, id, self.confirmer.as_ref())
            .await
        {
            Ok(DeleteOutcome::Deleted) => {
                self.notify(Notice::success(
                    "Deleted!",
                    format!("{} has been deleted successfully", capitalize(K::LABEL)),
                ));
                self.refresh().await;
                true
            }
            Ok(DeleteOutcome::Declined) => false,
            Err(e) => {
                self.notify_failure(format!("Failed to delete {}", K::LABEL), &e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("pet type"), "Pet type");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_guard_clears_flag_on_drop() {
        let flag = AtomicBool::new(true);
        {
            let _guard = SubmitGuard(&flag);
        }
        assert!(!flag.load(Ordering::Acquire));
    }
}
