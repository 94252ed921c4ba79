//! UI input coercion
//!
//! The UI hands over raw strings; the wire wants numbers. Coercion is
//! explicit and fallible here, never a silent truncation.

use thiserror::Error;

use lathe_bridge::EntityId;

/// Error type for UI input validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("'{0}' is not a valid entity id")]
    InvalidEntityId(String),

    #[error("'{0}' is not a valid length")]
    InvalidLength(String),
}

/// Parse an entity id from raw UI text.
pub fn parse_entity_id(text: &str) -> Result<EntityId, InputError> {
    text.trim()
        .parse()
        .map_err(|_| InputError::InvalidEntityId(text.to_string()))
}

/// Parse a finite length value from raw UI text.
pub fn parse_length(text: &str) -> Result<f64, InputError> {
    let value: f64 = text
        .trim()
        .parse()
        .map_err(|_| InputError::InvalidLength(text.to_string()))?;

    if !value.is_finite() {
        return Err(InputError::InvalidLength(text.to_string()));
    }
    Ok(value)
}
