/// Utility modules
pub mod email_validator;
pub mod numeric;
