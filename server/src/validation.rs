//! Field rules shared by request bodies. Each check returns
//! `AppError::Validation` naming the offending field.

use crate::error::{AppError, AppResult};

pub const MAX_NAME_LEN: usize = 255;

/// Titles and entity names: 1..=255 characters.
pub fn short_text(field: &str, value: &str) -> AppResult<()> {
    let len = value.chars().count();
    if len == 0 || len > MAX_NAME_LEN {
        return Err(AppError::validation(format!(
            "{field} must be between 1 and {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

pub fn non_empty(field: &str, value: &str) -> AppResult<()> {
    if value.is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    Ok(())
}

pub fn positive_i32(field: &str, value: i32) -> AppResult<()> {
    if value <= 0 {
        return Err(AppError::validation(format!("{field} must be greater than 0")));
    }
    Ok(())
}

pub fn positive_f64(field: &str, value: f64) -> AppResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(AppError::validation(format!("{field} must be greater than 0")));
    }
    Ok(())
}

pub fn in_range(field: &str, value: i32, min: i32, max: i32) -> AppResult<()> {
    if value < min || value > max {
        return Err(AppError::validation(format!(
            "{field} must be between {min} and {max}"
        )));
    }
    Ok(())
}
