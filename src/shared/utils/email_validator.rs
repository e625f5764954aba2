use crate::domain::errors::ValidationError;
use email_address::EmailAddress;

/// Lower-cased address if `email` is a deliverable-looking address whose
/// domain has at least one dot.
pub fn validate_and_normalize_email(email: &str) -> Result<String, ValidationError> {
    let address: EmailAddress = email
        .trim()
        .parse()
        .map_err(|_| ValidationError::new("email", "email is not a valid address"))?;

    if !address.domain().contains('.') {
        return Err(ValidationError::new(
            "email",
            format!("email domain '{}' has no top-level part", address.domain()),
        ));
    }

    Ok(address.as_str().to_lowercase())
}
