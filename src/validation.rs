//! Request validation helpers: identifier well-formedness and
//! required-field presence, checked before any store access.

use ulid::Ulid;

use crate::error::AppError;

/// Parse a path identifier, rejecting anything that is not a valid ULID.
pub fn parse_id(raw: &str) -> Result<Ulid, AppError> {
    Ulid::from_string(raw).map_err(|_| AppError::invalid(format!("invalid id: {raw}")))
}

/// Require a non-blank string field, naming the field in the error.
pub fn require<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::invalid(format!("missing required field: {field}"))),
    }
}
