//! Field checks shared by the parameter constructors.

use crate::server::error::AppError;

/// Rejects blank strings and strings longer than `max` characters.
pub fn required_text(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(field, format!("The {} field is required.", field)));
    }
    max_len(field, value, max)
}

/// Rejects strings longer than `max` characters.
pub fn max_len(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    if value.chars().count() > max {
        return Err(AppError::validation(
            field,
            format!("The {} may not be greater than {} characters.", field, max),
        ));
    }
    Ok(())
}

/// Rejects integers below `min`.
pub fn at_least(field: &str, value: i32, min: i32) -> Result<(), AppError> {
    if value < min {
        return Err(AppError::validation(
            field,
            format!("The {} must be at least {}.", field, min),
        ));
    }
    Ok(())
}
