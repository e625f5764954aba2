use super::fakes::{CallLog, FakeAttachmentGateway, FakeRecordGateway, FixedConfirmer, RecordingNotifier};
use petzone_admin::domain::ports::attachment_gateway::AttachmentGateway;
use petzone_admin::domain::ports::dialogs::{Confirmer, Notifier};
use petzone_admin::domain::ports::record_gateway::RecordGateway;
use petzone_admin::{
    AttachmentPolicy, EntityKind, EntityWorkflow, PendingAttachment, Pet, PetForm, RecordId, Role,
    ScreenController, Session, SessionUser, VlogForm,
};
use std::sync::Arc;

pub fn test_session() -> Session {
    Session::new(
        "test-token",
        SessionUser {
            name: "Ada".to_string(),
            email: "ada@petzone.test".to_string(),
            role: Role::Admin,
        },
    )
}

pub fn rex_form() -> PetForm {
    PetForm {
        name: "Rex".to_string(),
        pet_type: "Dog".to_string(),
        description: "Friendly".to_string(),
        price: "1500".to_string(),
        stock: "3".to_string(),
    }
}

pub fn vlog_form() -> VlogForm {
    VlogForm {
        description: "Our first puppy day".to_string(),
        author: "Mia".to_string(),
    }
}

pub fn valid_png() -> PendingAttachment {
    PendingAttachment::new("rex.png", "image/png", vec![137, 80, 78, 71, 13, 10, 26, 10])
}

pub fn pet(id: &str, name: &str, stock: u32) -> Pet {
    Pet {
        pet_id: RecordId::from(id),
        name: name.to_string(),
        description: "Friendly".to_string(),
        pet_type: "Dog".to_string(),
        price: 1500.0,
        stock,
        image: None,
    }
}

/// A workflow of kind `K` wired to fakes sharing one call log.
pub struct Harness<K: EntityKind> {
    pub log: CallLog,
    pub records: Arc<FakeRecordGateway<K>>,
    pub attachments: Arc<FakeAttachmentGateway>,
    pub workflow: EntityWorkflow<K>,
}

impl<K: EntityKind> Harness<K> {
    pub fn new() -> Self {
        Self::with_policy(AttachmentPolicy::default())
    }

    pub fn with_policy(policy: AttachmentPolicy) -> Self {
        let log = CallLog::default();
        let records = Arc::new(FakeRecordGateway::<K>::new(log.clone()));
        let attachments = Arc::new(FakeAttachmentGateway::new(log.clone()));
        let workflow = EntityWorkflow::new(
            records.clone() as Arc<dyn RecordGateway<K>>,
            attachments.clone() as Arc<dyn AttachmentGateway>,
            policy,
        );

        Self {
            log,
            records,
            attachments,
            workflow,
        }
    }
}

/// A screen over `harness` plus the notifier it reports to.
pub fn screen<K: EntityKind>(
    harness: &Harness<K>,
    confirmer: FixedConfirmer,
) -> (ScreenController<K>, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::default());
    let controller = ScreenController::new(
        harness.workflow.clone(),
        test_session(),
        notifier.clone() as Arc<dyn Notifier>,
        Arc::new(confirmer) as Arc<dyn Confirmer>,
    );
    (controller, notifier)
}
