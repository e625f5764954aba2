use crate::domain::entities::kind::{required, EntityKind, EntityRoutes};
use crate::domain::entities::RecordId;
use crate::domain::errors::ValidationError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vlog {
    #[serde(rename = "vlogId")]
    pub vlog_id: RecordId,
    #[serde(rename = "desc", default)]
    pub description: String,
    #[serde(rename = "VlogerName", default)]
    pub author: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VlogForm {
    pub description: String,
    pub author: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewVlog {
    #[serde(rename = "desc")]
    pub description: String,
    #[serde(rename = "VlogerName")]
    pub author: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VlogChanges {
    #[serde(rename = "vlogId")]
    pub vlog_id: RecordId,
    #[serde(flatten)]
    pub fields: NewVlog,
}

pub struct VlogKind;

impl EntityKind for VlogKind {
    type Record = Vlog;
    type Form = VlogForm;
    type Draft = NewVlog;
    type Changes = VlogChanges;

    const LABEL: &'static str = "vlog";
    const PLURAL: &'static str = "vlogs";
    const ROUTES: EntityRoutes = EntityRoutes {
        list: "/vlog/getVlogs",
        collection_field: "vlog",
        create: "/vlog/addVlog",
        created_id_field: "vlogId",
        update: "/vlog/updateVlog",
        delete: "/vlog/deleteVlog",
        delete_id_field: "vlogId",
        attachment_base: Some("/vlog/image"),
    };

    fn record_id(record: &Vlog) -> &RecordId {
        &record.vlog_id
    }

    fn form_from(record: &Vlog) -> VlogForm {
        VlogForm {
            description: record.description.clone(),
            author: record.author.clone(),
        }
    }

    fn validate_draft(form: &VlogForm) -> Result<NewVlog, ValidationError> {
        Ok(NewVlog {
            description: required("description", &form.description)?,
            author: required("author", &form.author)?,
        })
    }

    fn validate_changes(id: &RecordId, form: &VlogForm) -> Result<VlogChanges, ValidationError> {
        Ok(VlogChanges {
            vlog_id: id.clone(),
            fields: Self::validate_draft(form)?,
        })
    }
}
