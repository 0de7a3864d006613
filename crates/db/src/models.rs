use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use psychbook_core::{
    errors::BookingError,
    models::{
        appointment::Appointment,
        cabin::{AssignedPsychologist, Cabin, CabinPsychologist, Room},
        user::User,
    },
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUser {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbCabin {
    pub id: Uuid,
    pub name: String,
    pub location: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbRoom {
    pub id: Uuid,
    pub cabin_id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbCabinPsychologist {
    pub id: Uuid,
    pub cabin_id: Uuid,
    pub psychologist_id: Uuid,
    pub joined_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAssignedPsychologist {
    pub psychologist_id: Uuid,
    pub email: String,
    pub username: String,
    pub joined_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointment {
    pub id: Uuid,
    pub cabin_id: Uuid,
    pub psychologist_id: Uuid,
    pub client_name: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DbUser> for User {
    type Error = BookingError;

    fn try_from(row: DbUser) -> Result<Self, Self::Error> {
        Ok(User {
            id: row.id,
            email: row.email,
            username: row.username,
            role: row.role.parse()?,
            is_active: row.is_active,
            created_at: row.created_at,
        })
    }
}

impl From<DbCabin> for Cabin {
    fn from(row: DbCabin) -> Self {
        Cabin {
            id: row.id,
            name: row.name,
            location: row.location,
            created_by: row.created_by,
            created_at: row.created_at,
        }
    }
}

impl From<DbRoom> for Room {
    fn from(row: DbRoom) -> Self {
        Room {
            id: row.id,
            cabin_id: row.cabin_id,
            name: row.name,
        }
    }
}

impl From<DbCabinPsychologist> for CabinPsychologist {
    fn from(row: DbCabinPsychologist) -> Self {
        CabinPsychologist {
            id: row.id,
            cabin_id: row.cabin_id,
            psychologist_id: row.psychologist_id,
            joined_at: row.joined_at,
        }
    }
}

impl From<DbAssignedPsychologist> for AssignedPsychologist {
    fn from(row: DbAssignedPsychologist) -> Self {
        AssignedPsychologist {
            psychologist_id: row.psychologist_id,
            email: row.email,
            username: row.username,
            joined_at: row.joined_at,
        }
    }
}

impl TryFrom<DbAppointment> for Appointment {
    type Error = BookingError;

    fn try_from(row: DbAppointment) -> Result<Self, Self::Error> {
        Ok(Appointment {
            id: row.id,
            cabin_id: row.cabin_id,
            psychologist_id: row.psychologist_id,
            client_name: row.client_name,
            date: row.date,
            start_time: row.start_time,
            end_time: row.end_time,
            status: row.status.parse()?,
            notes: row.notes,
            created_at: row.created_at,
        })
    }
}
