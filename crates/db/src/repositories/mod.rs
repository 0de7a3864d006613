//! PostgreSQL implementation of the storage contracts.
//!
//! Each submodule exposes plain async functions over a pool; [`PgStore`]
//! wires them into the repository traits.

pub mod appointment;
pub mod assignment;
pub mod cabin;
pub mod user;

use async_trait::async_trait;
use psychbook_core::{
    errors::BookingResult,
    models::{
        appointment::{Appointment, NewAppointment},
        cabin::{AssignedPsychologist, Cabin, CabinPsychologist, NewCabin, Room},
        user::{NewUser, Role, User},
    },
    repository::{AppointmentRepository, AssignmentRepository, CabinRepository, UserRepository},
};
use uuid::Uuid;

use crate::DbPool;

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl UserRepository for PgStore {
    async fn create_user(&self, new_user: &NewUser) -> BookingResult<User> {
        user::create_user(&self.pool, new_user).await
    }

    async fn find_user_with_role(&self, id: Uuid, role: Role) -> BookingResult<Option<User>> {
        user::find_user_with_role(&self.pool, id, role).await
    }
}

#[async_trait]
impl CabinRepository for PgStore {
    async fn create_cabin(&self, new_cabin: &NewCabin) -> BookingResult<Cabin> {
        cabin::create_cabin(&self.pool, new_cabin).await
    }

    async fn find_cabin(&self, id: Uuid) -> BookingResult<Option<Cabin>> {
        cabin::find_cabin(&self.pool, id).await
    }

    async fn list_cabins_by_owner(&self, owner: Uuid) -> BookingResult<Vec<Cabin>> {
        cabin::list_cabins_by_owner(&self.pool, owner).await
    }

    async fn update_cabin(&self, updated: &Cabin) -> BookingResult<Cabin> {
        cabin::update_cabin(&self.pool, updated).await
    }

    async fn delete_cabin(&self, id: Uuid) -> BookingResult<bool> {
        cabin::delete_cabin(&self.pool, id).await
    }

    async fn create_room(&self, cabin_id: Uuid, name: &str) -> BookingResult<Room> {
        cabin::create_room(&self.pool, cabin_id, name).await
    }

    async fn list_rooms(&self, cabin_id: Uuid) -> BookingResult<Vec<Room>> {
        cabin::list_rooms(&self.pool, cabin_id).await
    }

    async fn find_room(&self, cabin_id: Uuid, room_id: Uuid) -> BookingResult<Option<Room>> {
        cabin::find_room(&self.pool, cabin_id, room_id).await
    }

    async fn update_room(&self, room: &Room) -> BookingResult<Room> {
        cabin::update_room(&self.pool, room).await
    }

    async fn delete_room(&self, cabin_id: Uuid, room_id: Uuid) -> BookingResult<bool> {
        cabin::delete_room(&self.pool, cabin_id, room_id).await
    }
}

#[async_trait]
impl AssignmentRepository for PgStore {
    async fn create_assignment(
        &self,
        cabin_id: Uuid,
        psychologist_id: Uuid,
    ) -> BookingResult<CabinPsychologist> {
        assignment::create_assignment(&self.pool, cabin_id, psychologist_id).await
    }

    async fn assignment_exists(&self, cabin_id: Uuid, psychologist_id: Uuid) -> BookingResult<bool> {
        assignment::assignment_exists(&self.pool, cabin_id, psychologist_id).await
    }

    async fn list_assignments(&self, cabin_id: Uuid) -> BookingResult<Vec<AssignedPsychologist>> {
        assignment::list_assignments(&self.pool, cabin_id).await
    }

    async fn find_assignment_for(
        &self,
        psychologist_id: Uuid,
    ) -> BookingResult<Option<CabinPsychologist>> {
        assignment::find_assignment_for(&self.pool, psychologist_id).await
    }

    async fn delete_assignment(&self, cabin_id: Uuid, psychologist_id: Uuid) -> BookingResult<bool> {
        assignment::delete_assignment(&self.pool, cabin_id, psychologist_id).await
    }
}

#[async_trait]
impl AppointmentRepository for PgStore {
    async fn create_appointment(&self, new_appointment: &NewAppointment) -> BookingResult<Appointment> {
        appointment::create_appointment(&self.pool, new_appointment).await
    }

    async fn find_appointment(&self, id: Uuid) -> BookingResult<Option<Appointment>> {
        appointment::find_appointment(&self.pool, id).await
    }

    async fn list_appointments_by_cabin(&self, cabin_id: Uuid) -> BookingResult<Vec<Appointment>> {
        appointment::list_appointments_by_cabin(&self.pool, cabin_id).await
    }

    async fn list_appointments_by_psychologist(
        &self,
        psychologist_id: Uuid,
    ) -> BookingResult<Vec<Appointment>> {
        appointment::list_appointments_by_psychologist(&self.pool, psychologist_id).await
    }

    async fn update_appointment(&self, updated: &Appointment) -> BookingResult<Appointment> {
        appointment::update_appointment(&self.pool, updated).await
    }

    async fn delete_appointment(&self, id: Uuid) -> BookingResult<bool> {
        appointment::delete_appointment(&self.pool, id).await
    }
}
