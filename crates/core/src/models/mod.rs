pub mod appointment;
pub mod cabin;
pub mod user;

use crate::errors::{BookingError, BookingResult};

/// Checks that a required text field is present and within `max` characters.
pub(crate) fn validate_text(field: &str, value: &str, max: usize) -> BookingResult<()> {
    if value.trim().is_empty() {
        return Err(BookingError::Validation(format!("{} must not be empty", field)));
    }
    if value.chars().count() > max {
        return Err(BookingError::Validation(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(())
}
