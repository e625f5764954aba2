use crate::domain::entities::{ConfirmPrompt, Notice};
use async_trait::async_trait;

/// Presents notifications (alerts, toasts, banners) to the operator.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Asks the operator to confirm a destructive action.
#[async_trait]
pub trait Confirmer: Send + Sync {
    async fn confirm(&self, prompt: &ConfirmPrompt) -> bool;
}
