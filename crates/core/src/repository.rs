//! Storage contracts.
//!
//! Implementations must enforce the uniqueness rules themselves and report a
//! violation as [`BookingError::Conflict`](crate::errors::BookingError::Conflict):
//!
//! - user email is unique;
//! - a psychologist has at most one assignment across all cabins;
//! - no two appointments share `(cabin_id, date, start_time, end_time)`.
//!
//! Deleting a cabin removes its rooms, assignments and appointments.

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    errors::BookingResult,
    models::{
        appointment::{Appointment, NewAppointment},
        cabin::{AssignedPsychologist, Cabin, CabinPsychologist, NewCabin, Room},
        user::{NewUser, Role, User},
    },
};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, user: &NewUser) -> BookingResult<User>;
    /// Finds a user only if it carries the given role.
    async fn find_user_with_role(&self, id: Uuid, role: Role) -> BookingResult<Option<User>>;
}

#[async_trait]
pub trait CabinRepository: Send + Sync {
    async fn create_cabin(&self, cabin: &NewCabin) -> BookingResult<Cabin>;
    async fn find_cabin(&self, id: Uuid) -> BookingResult<Option<Cabin>>;
    async fn list_cabins_by_owner(&self, owner: Uuid) -> BookingResult<Vec<Cabin>>;
    async fn update_cabin(&self, cabin: &Cabin) -> BookingResult<Cabin>;
    async fn delete_cabin(&self, id: Uuid) -> BookingResult<bool>;

    async fn create_room(&self, cabin_id: Uuid, name: &str) -> BookingResult<Room>;
    async fn list_rooms(&self, cabin_id: Uuid) -> BookingResult<Vec<Room>>;
    async fn find_room(&self, cabin_id: Uuid, room_id: Uuid) -> BookingResult<Option<Room>>;
    async fn update_room(&self, room: &Room) -> BookingResult<Room>;
    async fn delete_room(&self, cabin_id: Uuid, room_id: Uuid) -> BookingResult<bool>;
}

#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    async fn create_assignment(
        &self,
        cabin_id: Uuid,
        psychologist_id: Uuid,
    ) -> BookingResult<CabinPsychologist>;
    async fn assignment_exists(&self, cabin_id: Uuid, psychologist_id: Uuid) -> BookingResult<bool>;
    async fn list_assignments(&self, cabin_id: Uuid) -> BookingResult<Vec<AssignedPsychologist>>;
    async fn find_assignment_for(
        &self,
        psychologist_id: Uuid,
    ) -> BookingResult<Option<CabinPsychologist>>;
    async fn delete_assignment(&self, cabin_id: Uuid, psychologist_id: Uuid) -> BookingResult<bool>;
}

#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    async fn create_appointment(&self, appointment: &NewAppointment) -> BookingResult<Appointment>;
    async fn find_appointment(&self, id: Uuid) -> BookingResult<Option<Appointment>>;
    /// Ordered by date, then start time.
    async fn list_appointments_by_cabin(&self, cabin_id: Uuid) -> BookingResult<Vec<Appointment>>;
    /// Ordered by date, then start time.
    async fn list_appointments_by_psychologist(
        &self,
        psychologist_id: Uuid,
    ) -> BookingResult<Vec<Appointment>>;
    async fn update_appointment(&self, appointment: &Appointment) -> BookingResult<Appointment>;
    async fn delete_appointment(&self, id: Uuid) -> BookingResult<bool>;
}

/// Everything the services need from storage.
pub trait Store: UserRepository + CabinRepository + AssignmentRepository + AppointmentRepository {}

impl<T> Store for T where
    T: UserRepository + CabinRepository + AssignmentRepository + AppointmentRepository
{
}
