//! Translation of storage failures into [`BookingError`].
//!
//! Constraint names are shared between the PostgreSQL schema and the
//! in-memory store so both report the same conflicts.

use psychbook_core::errors::BookingError;

pub const UNIQUE_USER_EMAIL: &str = "unique_user_email";
pub const UNIQUE_PSYCHOLOGIST_ASSIGNMENT: &str = "unique_psychologist_assignment";
pub const UNIQUE_APPOINTMENT_SLOT: &str = "unique_appointment_slot";

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";
const CHECK_VIOLATION: &str = "23514";

pub fn conflict(constraint: &str) -> BookingError {
    let message = match constraint {
        UNIQUE_USER_EMAIL => "A user with this email already exists",
        UNIQUE_PSYCHOLOGIST_ASSIGNMENT => "Psychologist is already assigned to a cabin",
        UNIQUE_APPOINTMENT_SLOT => "This time slot is already booked in this cabin",
        _ => "Record already exists",
    };
    BookingError::Conflict(message.to_string())
}

pub fn map_db_error(err: sqlx::Error) -> BookingError {
    if let Some(db_err) = err.as_database_error() {
        let constraint = db_err.constraint().unwrap_or_default().to_string();
        match db_err.code().as_deref() {
            Some(UNIQUE_VIOLATION) => return conflict(&constraint),
            Some(FOREIGN_KEY_VIOLATION) => {
                return BookingError::NotFound(format!(
                    "Referenced record does not exist ({})",
                    constraint
                ));
            }
            Some(CHECK_VIOLATION) => {
                return BookingError::Validation(format!(
                    "Value rejected by constraint {}",
                    constraint
                ));
            }
            _ => {}
        }
    }

    tracing::error!("Database error: {}", err);
    BookingError::Database(eyre::Report::new(err))
}
