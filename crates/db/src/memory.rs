//! In-process store with the same constraint behaviour as the PostgreSQL
//! schema: unique email, one assignment per psychologist, one appointment
//! per slot, foreign keys and cascading cabin deletes.
//!
//! Every operation runs under a single lock, so each mutation is atomic and
//! concurrent writers to the same slot are serialized; the loser receives
//! the same conflict PostgreSQL would report.

use async_trait::async_trait;
use chrono::Utc;
use psychbook_core::{
    errors::{BookingError, BookingResult},
    models::{
        appointment::{Appointment, AppointmentStatus, NewAppointment, validate_time_range},
        cabin::{AssignedPsychologist, Cabin, CabinPsychologist, NewCabin, Room},
        user::{NewUser, Role, User},
    },
    repository::{AppointmentRepository, AssignmentRepository, CabinRepository, UserRepository},
};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::{
    UNIQUE_APPOINTMENT_SLOT, UNIQUE_PSYCHOLOGIST_ASSIGNMENT, UNIQUE_USER_EMAIL, conflict,
};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    cabins: Vec<Cabin>,
    rooms: Vec<Room>,
    assignments: Vec<CabinPsychologist>,
    appointments: Vec<Appointment>,
}

impl Tables {
    fn require_user(&self, id: Uuid) -> BookingResult<()> {
        if self.users.iter().any(|user| user.id == id) {
            Ok(())
        } else {
            Err(missing_reference("users", id))
        }
    }

    fn require_cabin(&self, id: Uuid) -> BookingResult<()> {
        if self.cabins.iter().any(|cabin| cabin.id == id) {
            Ok(())
        } else {
            Err(missing_reference("cabins", id))
        }
    }

    fn slot_taken(&self, candidate: &Appointment) -> bool {
        self.appointments.iter().any(|existing| {
            existing.id != candidate.id
                && existing.cabin_id == candidate.cabin_id
                && existing.date == candidate.date
                && existing.start_time == candidate.start_time
                && existing.end_time == candidate.end_time
        })
    }
}

fn missing_reference(table: &str, id: Uuid) -> BookingError {
    BookingError::NotFound(format!("Referenced record does not exist ({} {})", table, id))
}

fn sorted_by_slot(mut appointments: Vec<Appointment>) -> Vec<Appointment> {
    appointments.sort_by_key(|appointment| (appointment.date, appointment.start_time));
    appointments
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create_user(&self, new_user: &NewUser) -> BookingResult<User> {
        let mut tables = self.tables.lock().await;
        if tables.users.iter().any(|user| user.email == new_user.email) {
            return Err(conflict(UNIQUE_USER_EMAIL));
        }

        let user = User {
            id: Uuid::new_v4(),
            email: new_user.email.clone(),
            username: new_user.username.clone(),
            role: new_user.role,
            is_active: true,
            created_at: Utc::now(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_user_with_role(&self, id: Uuid, role: Role) -> BookingResult<Option<User>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .users
            .iter()
            .find(|user| user.id == id && user.role == role)
            .cloned())
    }
}

#[async_trait]
impl CabinRepository for MemoryStore {
    async fn create_cabin(&self, new_cabin: &NewCabin) -> BookingResult<Cabin> {
        let mut tables = self.tables.lock().await;
        tables.require_user(new_cabin.created_by)?;

        let cabin = Cabin {
            id: Uuid::new_v4(),
            name: new_cabin.name.clone(),
            location: new_cabin.location.clone(),
            created_by: new_cabin.created_by,
            created_at: Utc::now(),
        };
        tables.cabins.push(cabin.clone());
        Ok(cabin)
    }

    async fn find_cabin(&self, id: Uuid) -> BookingResult<Option<Cabin>> {
        let tables = self.tables.lock().await;
        Ok(tables.cabins.iter().find(|cabin| cabin.id == id).cloned())
    }

    async fn list_cabins_by_owner(&self, owner: Uuid) -> BookingResult<Vec<Cabin>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .cabins
            .iter()
            .rev()
            .filter(|cabin| cabin.created_by == owner)
            .cloned()
            .collect())
    }

    async fn update_cabin(&self, updated: &Cabin) -> BookingResult<Cabin> {
        let mut tables = self.tables.lock().await;
        let cabin = tables
            .cabins
            .iter_mut()
            .find(|cabin| cabin.id == updated.id)
            .ok_or_else(|| BookingError::NotFound(format!("Cabin with ID {} not found", updated.id)))?;

        cabin.name = updated.name.clone();
        cabin.location = updated.location.clone();
        Ok(cabin.clone())
    }

    async fn delete_cabin(&self, id: Uuid) -> BookingResult<bool> {
        let mut tables = self.tables.lock().await;
        let before = tables.cabins.len();
        tables.cabins.retain(|cabin| cabin.id != id);
        if tables.cabins.len() == before {
            return Ok(false);
        }

        tables.rooms.retain(|room| room.cabin_id != id);
        tables.assignments.retain(|assignment| assignment.cabin_id != id);
        tables.appointments.retain(|appointment| appointment.cabin_id != id);
        Ok(true)
    }

    async fn create_room(&self, cabin_id: Uuid, name: &str) -> BookingResult<Room> {
        let mut tables = self.tables.lock().await;
        tables.require_cabin(cabin_id)?;

        let room = Room {
            id: Uuid::new_v4(),
            cabin_id,
            name: name.to_string(),
        };
        tables.rooms.push(room.clone());
        Ok(room)
    }

    async fn list_rooms(&self, cabin_id: Uuid) -> BookingResult<Vec<Room>> {
        let tables = self.tables.lock().await;
        let mut rooms: Vec<Room> = tables
            .rooms
            .iter()
            .filter(|room| room.cabin_id == cabin_id)
            .cloned()
            .collect();
        rooms.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rooms)
    }

    async fn find_room(&self, cabin_id: Uuid, room_id: Uuid) -> BookingResult<Option<Room>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .rooms
            .iter()
            .find(|room| room.id == room_id && room.cabin_id == cabin_id)
            .cloned())
    }

    async fn update_room(&self, updated: &Room) -> BookingResult<Room> {
        let mut tables = self.tables.lock().await;
        let room = tables
            .rooms
            .iter_mut()
            .find(|room| room.id == updated.id && room.cabin_id == updated.cabin_id)
            .ok_or_else(|| BookingError::NotFound(format!("Room with ID {} not found", updated.id)))?;

        room.name = updated.name.clone();
        Ok(room.clone())
    }

    async fn delete_room(&self, cabin_id: Uuid, room_id: Uuid) -> BookingResult<bool> {
        let mut tables = self.tables.lock().await;
        let before = tables.rooms.len();
        tables
            .rooms
            .retain(|room| !(room.id == room_id && room.cabin_id == cabin_id));
        Ok(tables.rooms.len() < before)
    }
}

#[async_trait]
impl AssignmentRepository for MemoryStore {
    async fn create_assignment(
        &self,
        cabin_id: Uuid,
        psychologist_id: Uuid,
    ) -> BookingResult<CabinPsychologist> {
        let mut tables = self.tables.lock().await;
        tables.require_cabin(cabin_id)?;
        tables.require_user(psychologist_id)?;
        if tables
            .assignments
            .iter()
            .any(|assignment| assignment.psychologist_id == psychologist_id)
        {
            return Err(conflict(UNIQUE_PSYCHOLOGIST_ASSIGNMENT));
        }

        let assignment = CabinPsychologist {
            id: Uuid::new_v4(),
            cabin_id,
            psychologist_id,
            joined_at: Utc::now(),
        };
        tables.assignments.push(assignment.clone());
        Ok(assignment)
    }

    async fn assignment_exists(&self, cabin_id: Uuid, psychologist_id: Uuid) -> BookingResult<bool> {
        let tables = self.tables.lock().await;
        Ok(tables.assignments.iter().any(|assignment| {
            assignment.cabin_id == cabin_id && assignment.psychologist_id == psychologist_id
        }))
    }

    async fn list_assignments(&self, cabin_id: Uuid) -> BookingResult<Vec<AssignedPsychologist>> {
        let tables = self.tables.lock().await;
        let psychologists = tables
            .assignments
            .iter()
            .filter(|assignment| assignment.cabin_id == cabin_id)
            .filter_map(|assignment| {
                tables
                    .users
                    .iter()
                    .find(|user| user.id == assignment.psychologist_id)
                    .map(|user| AssignedPsychologist {
                        psychologist_id: user.id,
                        email: user.email.clone(),
                        username: user.username.clone(),
                        joined_at: assignment.joined_at,
                    })
            })
            .collect();
        Ok(psychologists)
    }

    async fn find_assignment_for(
        &self,
        psychologist_id: Uuid,
    ) -> BookingResult<Option<CabinPsychologist>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .assignments
            .iter()
            .find(|assignment| assignment.psychologist_id == psychologist_id)
            .cloned())
    }

    async fn delete_assignment(&self, cabin_id: Uuid, psychologist_id: Uuid) -> BookingResult<bool> {
        let mut tables = self.tables.lock().await;
        let before = tables.assignments.len();
        tables.assignments.retain(|assignment| {
            !(assignment.cabin_id == cabin_id && assignment.psychologist_id == psychologist_id)
        });
        Ok(tables.assignments.len() < before)
    }
}

#[async_trait]
impl AppointmentRepository for MemoryStore {
    async fn create_appointment(&self, new_appointment: &NewAppointment) -> BookingResult<Appointment> {
        let mut tables = self.tables.lock().await;
        tables.require_cabin(new_appointment.cabin_id)?;
        tables.require_user(new_appointment.psychologist_id)?;
        validate_time_range(new_appointment.start_time, new_appointment.end_time)?;

        let appointment = Appointment {
            id: Uuid::new_v4(),
            cabin_id: new_appointment.cabin_id,
            psychologist_id: new_appointment.psychologist_id,
            client_name: new_appointment.client_name.clone(),
            date: new_appointment.date,
            start_time: new_appointment.start_time,
            end_time: new_appointment.end_time,
            status: AppointmentStatus::Pending,
            notes: new_appointment.notes.clone(),
            created_at: Utc::now(),
        };
        if tables.slot_taken(&appointment) {
            return Err(conflict(UNIQUE_APPOINTMENT_SLOT));
        }

        tables.appointments.push(appointment.clone());
        Ok(appointment)
    }

    async fn find_appointment(&self, id: Uuid) -> BookingResult<Option<Appointment>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .appointments
            .iter()
            .find(|appointment| appointment.id == id)
            .cloned())
    }

    async fn list_appointments_by_cabin(&self, cabin_id: Uuid) -> BookingResult<Vec<Appointment>> {
        let tables = self.tables.lock().await;
        Ok(sorted_by_slot(
            tables
                .appointments
                .iter()
                .filter(|appointment| appointment.cabin_id == cabin_id)
                .cloned()
                .collect(),
        ))
    }

    async fn list_appointments_by_psychologist(
        &self,
        psychologist_id: Uuid,
    ) -> BookingResult<Vec<Appointment>> {
        let tables = self.tables.lock().await;
        Ok(sorted_by_slot(
            tables
                .appointments
                .iter()
                .filter(|appointment| appointment.psychologist_id == psychologist_id)
                .cloned()
                .collect(),
        ))
    }

    async fn update_appointment(&self, updated: &Appointment) -> BookingResult<Appointment> {
        let mut tables = self.tables.lock().await;
        validate_time_range(updated.start_time, updated.end_time)?;

        let index = tables
            .appointments
            .iter()
            .position(|appointment| appointment.id == updated.id)
            .ok_or_else(|| {
                BookingError::NotFound(format!("Appointment with ID {} not found", updated.id))
            })?;

        let mut candidate = tables.appointments[index].clone();
        candidate.client_name = updated.client_name.clone();
        candidate.date = updated.date;
        candidate.start_time = updated.start_time;
        candidate.end_time = updated.end_time;
        candidate.status = updated.status;
        candidate.notes = updated.notes.clone();

        if tables.slot_taken(&candidate) {
            return Err(conflict(UNIQUE_APPOINTMENT_SLOT));
        }

        tables.appointments[index] = candidate.clone();
        Ok(candidate)
    }

    async fn delete_appointment(&self, id: Uuid) -> BookingResult<bool> {
        let mut tables = self.tables.lock().await;
        let before = tables.appointments.len();
        tables.appointments.retain(|appointment| appointment.id != id);
        Ok(tables.appointments.len() < before)
    }
}
