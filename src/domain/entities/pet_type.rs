use crate::domain::entities::kind::{required, EntityKind, EntityRoutes};
use crate::domain::entities::RecordId;
use crate::domain::errors::ValidationError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetType {
    #[serde(rename = "petTypeId")]
    pub pet_type_id: RecordId,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PetTypeForm {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPetType {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PetTypeChanges {
    #[serde(rename = "petTypeId")]
    pub pet_type_id: RecordId,
    pub name: String,
}

pub struct PetTypeKind;

impl EntityKind for PetTypeKind {
    type Record = PetType;
    type Form = PetTypeForm;
    type Draft = NewPetType;
    type Changes = PetTypeChanges;

    const LABEL: &'static str = "pet type";
    const PLURAL: &'static str = "pet types";
    // The update path is spelled this way on the server.
    const ROUTES: EntityRoutes = EntityRoutes {
        list: "/pet/getAllPetType",
        collection_field: "petTypes",
        create: "/pet/createPetType",
        created_id_field: "petTypeId",
        update: "/pet/updatePetTpye",
        delete: "/pet/deletePetType",
        delete_id_field: "petTypeId",
        attachment_base: None,
    };

    fn record_id(record: &PetType) -> &RecordId {
        &record.pet_type_id
    }

    fn form_from(record: &PetType) -> PetTypeForm {
        PetTypeForm {
            name: record.name.clone(),
        }
    }

    fn validate_draft(form: &PetTypeForm) -> Result<NewPetType, ValidationError> {
        Ok(NewPetType {
            name: required("name", &form.name)?,
        })
    }

    fn validate_changes(
        id: &RecordId,
        form: &PetTypeForm,
    ) -> Result<PetTypeChanges, ValidationError> {
        Ok(PetTypeChanges {
            pet_type_id: id.clone(),
            name: required("name", &form.name)?,
        })
    }
}
