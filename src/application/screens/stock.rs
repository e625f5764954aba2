use crate::application::screens::controller::ScreenController;
use crate::application::services::entity_workflow::UpdateOutcome;
use crate::domain::entities::{EntityKind, Notice, PetKind, RecordId};
use crate::shared::utils::numeric::parse_stock;

/// The stock screen lists pets and adjusts how many of each are in stock.
pub type StockScreen = ScreenController<PetKind>;

impl ScreenController<PetKind> {
    /// Set the stock level of a listed pet, keeping its other fields.
    pub async fn set_stock(&self, pet_id: &RecordId, stock: &str) -> bool {
        if let Err(e) = parse_stock("stock", stock) {
            self.notify(Notice::error("Validation Error", e.message));
            return false;
        }

        let Some(pet) = self.find(pet_id).await else {
            self.notify(Notice::error(
                "Pet not found",
                "The pet is no longer listed. Refresh and try again.",
            ));
            return false;
        };

        let mut form = PetKind::form_from(&pet);
        form.stock = stock.trim().to_string();

        match self
            .workflow()
            .update(self.session(), pet_id, &form, None)
            .await
        {
            Ok(UpdateOutcome::Updated) | Ok(UpdateOutcome::PartiallyUpdated { .. }) => {
                self.notify(Notice::success(
                    "Stock updated",
                    format!("{} now has {} in stock", pet.name, stock.trim()),
                ));
                self.refresh().await;
                true
            }
            Err(e) => {
                self.notify(Notice::error("Failed to update stock", e.user_message()));
                false
            }
        }
    }
}
