//! Role and ownership gates applied before every operation.
//!
//! Two ownership rules with different failure modes live here:
//!
//! - cabins belong to the admin who created them; anyone else is told the
//!   cabin does not exist (`NotFound`);
//! - appointments belong to the psychologist who created them; a colleague in
//!   the same cabin can see them but gets `PermissionDenied` on mutation.

use uuid::Uuid;

use crate::{
    errors::{BookingError, BookingResult},
    models::{appointment::Appointment, cabin::Cabin, user::{Identity, Role}},
};

/// Groups of operations guarded by a role check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    ManageCabins,
    ManageRooms,
    ManageAssignments,
    ManageAppointments,
}

impl Capability {
    pub fn required_role(self) -> Role {
        match self {
            Capability::ManageCabins | Capability::ManageRooms | Capability::ManageAssignments => {
                Role::Admin
            }
            Capability::ManageAppointments => Role::Psychologist,
        }
    }
}

pub fn permits(role: Role, capability: Capability) -> bool {
    match (role, capability.required_role()) {
        (Role::Admin, Role::Admin) | (Role::Psychologist, Role::Psychologist) => true,
        (Role::Admin, Role::Psychologist) | (Role::Psychologist, Role::Admin) => false,
    }
}

/// Role gate. Inactive accounts are rejected as unauthenticated.
pub fn authorize(identity: &Identity, capability: Capability) -> BookingResult<()> {
    if !identity.is_active {
        return Err(BookingError::Authentication("Account is inactive".to_string()));
    }
    if !permits(identity.role, capability) {
        tracing::debug!(
            user_id = %identity.user_id,
            role = %identity.role,
            ?capability,
            "Role gate rejected request"
        );
        return Err(BookingError::Authorization(format!(
            "This operation requires the {} role",
            capability.required_role()
        )));
    }
    Ok(())
}

/// Resolves a cabin for its owning admin. Missing and foreign cabins produce
/// the same error.
pub fn owned_cabin(identity: &Identity, cabin_id: Uuid, cabin: Option<Cabin>) -> BookingResult<Cabin> {
    match cabin {
        Some(cabin) if cabin.created_by == identity.user_id => Ok(cabin),
        _ => Err(cabin_not_found(cabin_id)),
    }
}

pub fn cabin_not_found(cabin_id: Uuid) -> BookingError {
    BookingError::NotFound(format!("Cabin with ID {} not found", cabin_id))
}

/// Resolves an appointment visible to a psychologist: one in the cabin they
/// are assigned to, or one they own.
pub fn visible_appointment(
    identity: &Identity,
    appointment_id: Uuid,
    assigned_cabin: Option<Uuid>,
    appointment: Option<Appointment>,
) -> BookingResult<Appointment> {
    match appointment {
        Some(appointment)
            if appointment.psychologist_id == identity.user_id
                || Some(appointment.cabin_id) == assigned_cabin =>
        {
            Ok(appointment)
        }
        _ => Err(BookingError::NotFound(format!(
            "Appointment with ID {} not found",
            appointment_id
        ))),
    }
}

pub fn ensure_appointment_owner(identity: &Identity, appointment: &Appointment) -> BookingResult<()> {
    if appointment.psychologist_id != identity.user_id {
        return Err(BookingError::PermissionDenied(
            "You can only modify your own appointments".to_string(),
        ));
    }
    Ok(())
}
