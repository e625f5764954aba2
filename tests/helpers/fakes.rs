use async_trait::async_trait;
use petzone_admin::domain::ports::attachment_gateway::AttachmentGateway;
use petzone_admin::domain::ports::auth_gateway::AuthGateway;
use petzone_admin::domain::ports::dialogs::{Confirmer, Notifier};
use petzone_admin::domain::ports::record_gateway::RecordGateway;
use petzone_admin::infrastructure::http::{ApiError, ApiResult};
use petzone_admin::{
    ConfirmPrompt, Credentials, EntityKind, LoginResponse, Notice, PendingAttachment, RecordId,
    Session,
};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// One remote call as seen by the fakes, in the order it was made.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List,
    Create(Value),
    Update(Value),
    Delete(RecordId),
    Upload { path: String, id: RecordId, file_name: String },
}

/// Call log shared by the record and attachment fakes.
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<Call>>>);

impl CallLog {
    pub fn push(&self, call: Call) {
        self.0.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.0.lock().unwrap().iter().filter(|call| matches(call)).count()
    }

    pub fn clear(&self) {
        self.0.lock().unwrap().clear();
    }
}

pub fn server_error(message: &str) -> ApiError {
    ApiError::Status {
        status: 500,
        message: Some(message.to_string()),
    }
}

#[derive(Default)]
struct Failures {
    list: Option<ApiError>,
    create: Option<ApiError>,
    update: Option<ApiError>,
    delete: Option<ApiError>,
}

/// In-memory stand-in for the REST collection of one kind.
pub struct FakeRecordGateway<K: EntityKind> {
    log: CallLog,
    rows: Mutex<Vec<K::Record>>,
    next_id: Mutex<RecordId>,
    failures: Mutex<Failures>,
    create_gate: Mutex<Option<Arc<Notify>>>,
}

impl<K: EntityKind> FakeRecordGateway<K> {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            rows: Mutex::new(Vec::new()),
            next_id: Mutex::new(RecordId::from("new-1")),
            failures: Mutex::new(Failures::default()),
            create_gate: Mutex::new(None),
        }
    }

    /// Make `create` wait for `gate` after logging the call.
    pub fn hold_creates(&self, gate: Arc<Notify>) {
        *self.create_gate.lock().unwrap() = Some(gate);
    }

    pub fn set_rows(&self, rows: Vec<K::Record>) {
        *self.rows.lock().unwrap() = rows;
    }

    pub fn set_next_id(&self, id: impl Into<RecordId>) {
        *self.next_id.lock().unwrap() = id.into();
    }

    pub fn fail_list(&self, err: Option<ApiError>) {
        self.failures.lock().unwrap().list = err;
    }

    pub fn fail_create(&self, err: Option<ApiError>) {
        self.failures.lock().unwrap().create = err;
    }

    pub fn fail_update(&self, err: Option<ApiError>) {
        self.failures.lock().unwrap().update = err;
    }

    pub fn fail_delete(&self, err: Option<ApiError>) {
        self.failures.lock().unwrap().delete = err;
    }
}

#[async_trait]
impl<K: EntityKind> RecordGateway<K> for FakeRecordGateway<K> {
    async fn list(&self, _session: &Session) -> ApiResult<Vec<K::Record>> {
        self.log.push(Call::List);
        if let Some(err) = self.failures.lock().unwrap().list.clone() {
            return Err(err);
        }
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn create(&self, _session: &Session, draft: &K::Draft) -> ApiResult<RecordId> {
        self.log.push(Call::Create(serde_json::to_value(draft).unwrap()));
        let gate = self.create_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        if let Some(err) = self.failures.lock().unwrap().create.clone() {
            return Err(err);
        }
        Ok(self.next_id.lock().unwrap().clone())
    }

    async fn update(&self, _session: &Session, changes: &K::Changes) -> ApiResult<()> {
        self.log.push(Call::Update(serde_json::to_value(changes).unwrap()));
        match self.failures.lock().unwrap().update.clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn delete(&self, _session: &Session, id: &RecordId) -> ApiResult<()> {
        self.log.push(Call::Delete(id.clone()));
        match self.failures.lock().unwrap().delete.clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

pub struct FakeAttachmentGateway {
    log: CallLog,
    failure: Mutex<Option<ApiError>>,
}

impl FakeAttachmentGateway {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            failure: Mutex::new(None),
        }
    }

    pub fn fail_upload(&self, err: Option<ApiError>) {
        *self.failure.lock().unwrap() = err;
    }
}

#[async_trait]
impl AttachmentGateway for FakeAttachmentGateway {
    async fn upload_image(
        &self,
        _session: &Session,
        base_path: &str,
        id: &RecordId,
        attachment: &PendingAttachment,
    ) -> ApiResult<()> {
        self.log.push(Call::Upload {
            path: base_path.to_string(),
            id: id.clone(),
            file_name: attachment.file_name.clone(),
        });
        match self.failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Answers logins with a canned response and counts the attempts.
pub struct FakeAuthGateway {
    response: Mutex<ApiResult<Value>>,
    pub attempts: AtomicUsize,
}

impl FakeAuthGateway {
    pub fn answering(body: Value) -> Self {
        Self {
            response: Mutex::new(Ok(body)),
            attempts: AtomicUsize::new(0),
        }
    }

    pub fn failing(err: ApiError) -> Self {
        Self {
            response: Mutex::new(Err(err)),
            attempts: AtomicUsize::new(0),
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthGateway for FakeAuthGateway {
    async fn login(&self, _credentials: &Credentials) -> ApiResult<LoginResponse> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        let body = self.response.lock().unwrap().clone()?;
        Ok(serde_json::from_value(body)?)
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices.lock().unwrap().last().cloned()
    }

    pub fn titles(&self) -> Vec<String> {
        self.notices
            .lock()
            .unwrap()
            .iter()
            .map(|notice| notice.title.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

/// Gives the same answer to every prompt and remembers the prompts.
pub struct FixedConfirmer {
    answer: bool,
    prompts: Mutex<Vec<ConfirmPrompt>>,
}

impl FixedConfirmer {
    pub fn yes() -> Self {
        Self {
            answer: true,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn no() -> Self {
        Self {
            answer: false,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<ConfirmPrompt> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Confirmer for FixedConfirmer {
    async fn confirm(&self, prompt: &ConfirmPrompt) -> bool {
        self.prompts.lock().unwrap().push(prompt.clone());
        self.answer
    }
}
