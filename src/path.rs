use crate::error::AppError;

/// Parses a path segment as a record id; anything but a positive integer is a 400.
pub fn positive_id(raw: &str, invalid: &'static str) -> Result<i64, AppError> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => {
            tracing::warn!(raw, "invalid id in path");
            Err(AppError::validation(invalid))
        }
    }
}
