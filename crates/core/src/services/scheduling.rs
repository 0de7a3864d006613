//! Appointment booking for psychologists.
//!
//! Slot exclusivity is not checked here. The store rejects a second
//! appointment with the same `(cabin, date, start_time, end_time)` with
//! [`BookingError::Conflict`], which also settles concurrent attempts.

use tracing::info;
use uuid::Uuid;

use crate::{
    errors::{BookingError, BookingResult},
    models::{
        appointment::{Appointment, CreateAppointmentRequest, NewAppointment, UpdateAppointmentRequest},
        user::Identity,
    },
    policy::{self, Capability},
    repository::Store,
};

async fn assigned_cabin_id(store: &dyn Store, identity: &Identity) -> BookingResult<Option<Uuid>> {
    Ok(store
        .find_assignment_for(identity.user_id)
        .await?
        .map(|assignment| assignment.cabin_id))
}

async fn resolve_visible(
    store: &dyn Store,
    identity: &Identity,
    appointment_id: Uuid,
) -> BookingResult<Appointment> {
    let assigned_cabin = assigned_cabin_id(store, identity).await?;
    let appointment = store.find_appointment(appointment_id).await?;
    policy::visible_appointment(identity, appointment_id, assigned_cabin, appointment)
}

/// All appointments in the caller's cabin, whoever booked them.
pub async fn list_cabin_appointments(
    store: &dyn Store,
    identity: &Identity,
) -> BookingResult<Vec<Appointment>> {
    policy::authorize(identity, Capability::ManageAppointments)?;

    match assigned_cabin_id(store, identity).await? {
        Some(cabin_id) => store.list_appointments_by_cabin(cabin_id).await,
        None => Ok(Vec::new()),
    }
}

/// Appointments booked by the caller.
pub async fn list_own_appointments(
    store: &dyn Store,
    identity: &Identity,
) -> BookingResult<Vec<Appointment>> {
    policy::authorize(identity, Capability::ManageAppointments)?;
    store.list_appointments_by_psychologist(identity.user_id).await
}

pub async fn get_appointment(
    store: &dyn Store,
    identity: &Identity,
    appointment_id: Uuid,
) -> BookingResult<Appointment> {
    policy::authorize(identity, Capability::ManageAppointments)?;
    resolve_visible(store, identity, appointment_id).await
}

/// Books an appointment in the caller's cabin.
///
/// `end_time` defaults to one hour after `start_time`. The new appointment
/// starts out pending.
pub async fn create_appointment(
    store: &dyn Store,
    identity: &Identity,
    request: CreateAppointmentRequest,
) -> BookingResult<Appointment> {
    policy::authorize(identity, Capability::ManageAppointments)?;

    let cabin_id = assigned_cabin_id(store, identity)
        .await?
        .ok_or_else(|| BookingError::NotFound("Cabin not assigned to this psychologist".to_string()))?;

    let end_time = request.resolve_end_time()?;
    let new_appointment = NewAppointment {
        cabin_id,
        psychologist_id: identity.user_id,
        client_name: request.client_name,
        date: request.date,
        start_time: request.start_time,
        end_time,
        notes: request.notes,
    };

    let appointment = store.create_appointment(&new_appointment).await?;
    info!(
        appointment_id = %appointment.id,
        %cabin_id,
        psychologist_id = %identity.user_id,
        date = %appointment.date,
        start_time = %appointment.start_time,
        "Appointment booked"
    );
    Ok(appointment)
}

/// Edits an appointment owned by the caller. The owner is carried over from
/// the stored record, never from the request.
pub async fn update_appointment(
    store: &dyn Store,
    identity: &Identity,
    appointment_id: Uuid,
    request: UpdateAppointmentRequest,
) -> BookingResult<Appointment> {
    policy::authorize(identity, Capability::ManageAppointments)?;

    let mut appointment = resolve_visible(store, identity, appointment_id).await?;
    policy::ensure_appointment_owner(identity, &appointment)?;

    let owner = appointment.psychologist_id;
    request.apply(&mut appointment)?;
    appointment.psychologist_id = owner;

    let updated = store.update_appointment(&appointment).await?;
    info!(%appointment_id, status = %updated.status, "Appointment updated");
    Ok(updated)
}

pub async fn delete_appointment(
    store: &dyn Store,
    identity: &Identity,
    appointment_id: Uuid,
) -> BookingResult<()> {
    policy::authorize(identity, Capability::ManageAppointments)?;

    let appointment = resolve_visible(store, identity, appointment_id).await?;
    policy::ensure_appointment_owner(identity, &appointment)?;

    if !store.delete_appointment(appointment.id).await? {
        return Err(BookingError::NotFound(format!(
            "Appointment with ID {} not found",
            appointment_id
        )));
    }
    info!(%appointment_id, psychologist_id = %identity.user_id, "Appointment deleted");
    Ok(())
}
