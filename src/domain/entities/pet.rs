use crate::domain::entities::kind::{required, EntityKind, EntityRoutes};
use crate::domain::entities::RecordId;
use crate::domain::errors::ValidationError;
use crate::shared::utils::numeric::{number_or_string, parse_price, parse_stock};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub pet_id: RecordId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub pet_type: String,
    #[serde(deserialize_with = "number_or_string")]
    pub price: f64,
    #[serde(deserialize_with = "number_or_string")]
    pub stock: u32,
    #[serde(default)]
    pub image: Option<String>,
}

/// Raw input of the add/update pet dialog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PetForm {
    pub name: String,
    pub pet_type: String,
    pub description: String,
    pub price: String,
    pub stock: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPet {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub pet_type: String,
    pub price: f64,
    pub stock: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PetChanges {
    #[serde(rename = "petId")]
    pub pet_id: RecordId,
    #[serde(flatten)]
    pub fields: NewPet,
}

pub struct PetKind;

impl EntityKind for PetKind {
    type Record = Pet;
    type Form = PetForm;
    type Draft = NewPet;
    type Changes = PetChanges;

    const LABEL: &'static str = "pet";
    const PLURAL: &'static str = "pets";
    const ROUTES: EntityRoutes = EntityRoutes {
        list: "/pets/getPets",
        collection_field: "pets",
        create: "/pets/createPet",
        created_id_field: "petId",
        update: "/pets/updatePet",
        delete: "/pets/deletePet",
        delete_id_field: "petId",
        attachment_base: Some("/pets/image"),
    };

    fn record_id(record: &Pet) -> &RecordId {
        &record.pet_id
    }

    fn form_from(record: &Pet) -> PetForm {
        PetForm {
            name: record.name.clone(),
            pet_type: record.pet_type.clone(),
            description: record.description.clone(),
            price: record.price.to_string(),
            stock: record.stock.to_string(),
        }
    }

    fn validate_draft(form: &PetForm) -> Result<NewPet, ValidationError> {
        Ok(NewPet {
            name: required("name", &form.name)?,
            description: required("description", &form.description)?,
            pet_type: required("type", &form.pet_type)?,
            price: parse_price("price", &form.price)?,
            stock: parse_stock("stock", &form.stock)?,
        })
    }

    fn validate_changes(id: &RecordId, form: &PetForm) -> Result<PetChanges, ValidationError> {
        Ok(PetChanges {
            pet_id: id.clone(),
            fields: Self::validate_draft(form)?,
        })
    }
}
