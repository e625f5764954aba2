use crate::domain::entities::kind::{required, EntityKind, EntityRoutes};
use crate::domain::entities::RecordId;
use crate::domain::errors::ValidationError;
use crate::shared::utils::email_validator::validate_and_normalize_email;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    #[default]
    User,
    /// Any role the back-office does not know about (e.g. shop customers).
    #[serde(other)]
    Other,
}

impl Role {
    /// Only staff roles may sign in to the back-office.
    pub fn can_sign_in(&self) -> bool {
        matches!(self, Role::Admin | Role::Manager)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Manager => write!(f, "manager"),
            Role::User => write!(f, "user"),
            Role::Other => write!(f, "other"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "manager" => Ok(Role::Manager),
            "user" => Ok(Role::User),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(alias = "_id")]
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

impl Default for UserForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            password: String::new(),
            role: Role::User.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserChanges {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    /// Left out of the body when the operator did not type a new one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub role: Role,
}

pub struct UserKind;

fn parse_role(value: &str) -> Result<Role, ValidationError> {
    value
        .parse()
        .map_err(|_| ValidationError::new("role", "role must be one of admin, manager, user"))
}

fn parse_email(value: &str) -> Result<String, ValidationError> {
    required("email", value)?;
    validate_and_normalize_email(value)
}

impl EntityKind for UserKind {
    type Record = User;
    type Form = UserForm;
    type Draft = NewUser;
    type Changes = UserChanges;

    const LABEL: &'static str = "user";
    const PLURAL: &'static str = "users";
    const ROUTES: EntityRoutes = EntityRoutes {
        list: "/user/users",
        collection_field: "users",
        create: "/user/createuser",
        created_id_field: "id",
        update: "/user/updateuser",
        delete: "/user/deleteuser",
        delete_id_field: "id",
        attachment_base: None,
    };

    fn record_id(record: &User) -> &RecordId {
        &record.id
    }

    fn form_from(record: &User) -> UserForm {
        UserForm {
            name: record.name.clone(),
            email: record.email.clone(),
            password: String::new(),
            role: record.role.to_string(),
        }
    }

    fn validate_draft(form: &UserForm) -> Result<NewUser, ValidationError> {
        Ok(NewUser {
            name: required("name", &form.name)?,
            email: parse_email(&form.email)?,
            password: required("password", &form.password)?,
            role: parse_role(&form.role)?,
        })
    }

    fn validate_changes(id: &RecordId, form: &UserForm) -> Result<UserChanges, ValidationError> {
        let password = match form.password.trim() {
            "" => None,
            _ => Some(form.password.clone()),
        };

        Ok(UserChanges {
            id: id.clone(),
            name: required("name", &form.name)?,
            email: parse_email(&form.email)?,
            password,
            role: parse_role(&form.role)?,
        })
    }
}
