use crate::{error::map_db_error, models::DbAppointment};
use chrono::Utc;
use psychbook_core::{
    errors::{BookingError, BookingResult},
    models::appointment::{Appointment, AppointmentStatus, NewAppointment},
};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

const APPOINTMENT_COLUMNS: &str =
    "id, cabin_id, psychologist_id, client_name, date, start_time, end_time, status, notes, created_at";

fn into_appointments(rows: Vec<DbAppointment>) -> BookingResult<Vec<Appointment>> {
    rows.into_iter().map(Appointment::try_from).collect()
}

/// Inserts a pending appointment. The slot is claimed by the
/// `unique_appointment_slot` constraint, so of two concurrent inserts for the
/// same slot exactly one succeeds and the other gets a conflict.
pub async fn create_appointment(
    pool: &Pool<Postgres>,
    appointment: &NewAppointment,
) -> BookingResult<Appointment> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating appointment: id={}, cabin_id={}, date={}, start={}, end={}",
        id, appointment.cabin_id, appointment.date, appointment.start_time, appointment.end_time
    );

    let row = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        INSERT INTO appointments
            (id, cabin_id, psychologist_id, client_name, date, start_time, end_time, status, notes, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING {}
        "#,
        APPOINTMENT_COLUMNS
    ))
    .bind(id)
    .bind(appointment.cabin_id)
    .bind(appointment.psychologist_id)
    .bind(&appointment.client_name)
    .bind(appointment.date)
    .bind(appointment.start_time)
    .bind(appointment.end_time)
    .bind(AppointmentStatus::Pending.as_str())
    .bind(appointment.notes.as_deref())
    .bind(now)
    .fetch_one(pool)
    .await
    .map_err(map_db_error)?;

    row.try_into()
}

pub async fn find_appointment(pool: &Pool<Postgres>, id: Uuid) -> BookingResult<Option<Appointment>> {
    let row = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        SELECT {}
        FROM appointments
        WHERE id = $1
        "#,
        APPOINTMENT_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(map_db_error)?;

    row.map(Appointment::try_from).transpose()
}

pub async fn list_appointments_by_cabin(
    pool: &Pool<Postgres>,
    cabin_id: Uuid,
) -> BookingResult<Vec<Appointment>> {
    let rows = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        SELECT {}
        FROM appointments
        WHERE cabin_id = $1
        ORDER BY date ASC, start_time ASC
        "#,
        APPOINTMENT_COLUMNS
    ))
    .bind(cabin_id)
    .fetch_all(pool)
    .await
    .map_err(map_db_error)?;

    into_appointments(rows)
}

pub async fn list_appointments_by_psychologist(
    pool: &Pool<Postgres>,
    psychologist_id: Uuid,
) -> BookingResult<Vec<Appointment>> {
    let rows = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        SELECT {}
        FROM appointments
        WHERE psychologist_id = $1
        ORDER BY date ASC, start_time ASC
        "#,
        APPOINTMENT_COLUMNS
    ))
    .bind(psychologist_id)
    .fetch_all(pool)
    .await
    .map_err(map_db_error)?;

    into_appointments(rows)
}

/// Writes every mutable column. `psychologist_id` and `cabin_id` are not
/// part of the update.
pub async fn update_appointment(
    pool: &Pool<Postgres>,
    appointment: &Appointment,
) -> BookingResult<Appointment> {
    let row = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        UPDATE appointments
        SET client_name = $2, date = $3, start_time = $4, end_time = $5, status = $6, notes = $7
        WHERE id = $1
        RETURNING {}
        "#,
        APPOINTMENT_COLUMNS
    ))
    .bind(appointment.id)
    .bind(&appointment.client_name)
    .bind(appointment.date)
    .bind(appointment.start_time)
    .bind(appointment.end_time)
    .bind(appointment.status.as_str())
    .bind(appointment.notes.as_deref())
    .fetch_optional(pool)
    .await
    .map_err(map_db_error)?
    .ok_or_else(|| {
        BookingError::NotFound(format!("Appointment with ID {} not found", appointment.id))
    })?;

    row.try_into()
}

pub async fn delete_appointment(pool: &Pool<Postgres>, id: Uuid) -> BookingResult<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM appointments
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await
    .map_err(map_db_error)?;

    Ok(result.rows_affected() > 0)
}
