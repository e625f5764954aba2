use crate::application::screens::{ScreenController, StockScreen};
use crate::application::services::{AttachmentPolicy, AuthService, EntityWorkflow};
use crate::config::Config;
use crate::domain::entities::{EntityKind, PetKind, PetTypeKind, Session, UserKind, VlogKind};
use crate::domain::ports::attachment_gateway::AttachmentGateway;
use crate::domain::ports::auth_gateway::AuthGateway;
use crate::domain::ports::dialogs::{Confirmer, Notifier};
use crate::domain::ports::record_gateway::RecordGateway;
use crate::domain::ports::session_store::SessionStore;
use crate::infrastructure::http::{ApiClient, ApiResult};
use crate::infrastructure::persistence::FileSessionStore;
use std::sync::Arc;

/// Every screen of the back-office, bound to one signed-in session.
pub struct Screens {
    pub pets: ScreenController<PetKind>,
    pub pet_types: ScreenController<PetTypeKind>,
    pub stock: StockScreen,
    pub users: ScreenController<UserKind>,
    pub vlogs: ScreenController<VlogKind>,
}

impl Screens {
    /// Load every screen once. Returns how many loaded successfully.
    pub async fn refresh_all(&self) -> usize {
        let results = [
            self.pets.refresh().await,
            self.pet_types.refresh().await,
            self.stock.refresh().await,
            self.users.refresh().await,
            self.vlogs.refresh().await,
        ];
        results.iter().filter(|ok| **ok).count()
    }
}

pub fn build_api_client(config: &Config) -> ApiResult<Arc<ApiClient>> {
    let client = ApiClient::new(&config.api_base_url, config.request_timeout())?;
    tracing::info!("API client targeting {}", client.base_url());
    Ok(Arc::new(client))
}

pub fn build_auth_service(client: Arc<ApiClient>, config: &Config) -> AuthService {
    let store = Arc::new(FileSessionStore::new(&config.session_file)) as Arc<dyn SessionStore>;
    AuthService::new(client as Arc<dyn AuthGateway>, store)
}

fn workflow<K: EntityKind>(
    client: &Arc<ApiClient>,
    policy: AttachmentPolicy,
) -> EntityWorkflow<K> {
    EntityWorkflow::new(
        client.clone() as Arc<dyn RecordGateway<K>>,
        client.clone() as Arc<dyn AttachmentGateway>,
        policy,
    )
}

pub fn build_screens(
    client: Arc<ApiClient>,
    config: &Config,
    session: Session,
    notifier: Arc<dyn Notifier>,
    confirmer: Arc<dyn Confirmer>,
) -> Screens {
    let policy = AttachmentPolicy::new(config.max_image_bytes);

    Screens {
        pets: ScreenController::new(
            workflow(&client, policy),
            session.clone(),
            notifier.clone(),
            confirmer.clone(),
        ),
        pet_types: ScreenController::new(
            workflow(&client, policy),
            session.clone(),
            notifier.clone(),
            confirmer.clone(),
        ),
        stock: ScreenController::new(
            workflow(&client, policy),
            session.clone(),
            notifier.clone(),
            confirmer.clone(),
        ),
        users: ScreenController::new(
            workflow(&client, policy),
            session.clone(),
            notifier.clone(),
            confirmer.clone(),
        ),
        vlogs: ScreenController::new(workflow(&client, policy), session, notifier, confirmer),
    }
}
