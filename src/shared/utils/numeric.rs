use crate::domain::errors::ValidationError;
use serde::{Deserialize, Deserializer};
use std::fmt::Display;
use std::str::FromStr;

/// Parse a price typed by the operator. Must be a finite, non-negative number.
pub fn parse_price(field: &'static str, value: &str) -> Result<f64, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(field, format!("{} is required", field)));
    }

    match trimmed.parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => Ok(price),
        _ => Err(ValidationError::new(
            field,
            format!("{} must be a non-negative number", field),
        )),
    }
}

/// Parse a stock count typed by the operator. Must be a whole number >= 0.
pub fn parse_stock(field: &'static str, value: &str) -> Result<u32, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(field, format!("{} is required", field)));
    }

    trimmed.parse::<u32>().map_err(|_| {
        ValidationError::new(field, format!("{} must be a whole number", field))
    })
}

/// Serde helper for numeric fields the API sends either as numbers or as
/// numeric strings.
pub fn number_or_string<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(serde_json::Number),
        Text(String),
    }

    let text = match Raw::deserialize(deserializer)? {
        Raw::Number(n) => n.to_string(),
        Raw::Text(s) => s,
    };

    text.trim().parse().map_err(serde::de::Error::custom)
}
