use crate::domain::entities::{ConfirmPrompt, Notice, NoticeLevel};
use crate::domain::ports::dialogs::{Confirmer, Notifier};
use async_trait::async_trait;

/// Writes notices to the log. Used by the headless binary.
#[derive(Clone, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => tracing::info!("{}: {}", notice.title, notice.text),
            NoticeLevel::Warning => tracing::warn!("{}: {}", notice.title, notice.text),
            NoticeLevel::Error => tracing::error!("{}: {}", notice.title, notice.text),
        }
    }
}

/// Answers every confirmation the same way.
#[derive(Clone, Copy)]
pub struct StaticConfirmer {
    answer: bool,
}

impl StaticConfirmer {
    pub fn accept_all() -> Self {
        Self { answer: true }
    }

    pub fn decline_all() -> Self {
        Self { answer: false }
    }
}

#[async_trait]
impl Confirmer for StaticConfirmer {
    async fn confirm(&self, prompt: &ConfirmPrompt) -> bool {
        tracing::debug!(
            "Confirmation '{}' answered {}",
            prompt.title,
            if self.answer { "yes" } else { "no" }
        );
        self.answer
    }
}
