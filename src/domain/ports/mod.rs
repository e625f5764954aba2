pub mod attachment_gateway;
pub mod auth_gateway;
pub mod dialogs;
pub mod record_gateway;
pub mod session_store;
