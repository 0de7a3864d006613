use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validate_text;
use crate::errors::{BookingError, BookingResult};

pub const CABIN_NAME_MAX: usize = 100;
pub const CABIN_LOCATION_MAX: usize = 255;
pub const ROOM_NAME_MAX: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cabin {
    pub id: Uuid,
    pub name: String,
    pub location: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: Uuid,
    pub cabin_id: Uuid,
    pub name: String,
}

/// A validated cabin ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCabin {
    pub created_by: Uuid,
    pub name: String,
    pub location: Option<String>,
}

/// Link between a psychologist and the one cabin they work in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CabinPsychologist {
    pub id: Uuid,
    pub cabin_id: Uuid,
    pub psychologist_id: Uuid,
    pub joined_at: DateTime<Utc>,
}

/// Assignment joined with the psychologist's account details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignedPsychologist {
    pub psychologist_id: Uuid,
    pub email: String,
    pub username: String,
    pub joined_at: DateTime<Utc>,
}

/// A cabin together with its rooms and assigned psychologists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CabinDetail {
    pub id: Uuid,
    pub name: String,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub rooms: Vec<Room>,
    pub psychologists: Vec<AssignedPsychologist>,
}

impl CabinDetail {
    pub fn new(cabin: Cabin, rooms: Vec<Room>, psychologists: Vec<AssignedPsychologist>) -> Self {
        Self {
            id: cabin.id,
            name: cabin.name,
            location: cabin.location,
            created_at: cabin.created_at,
            rooms,
            psychologists,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCabinRequest {
    pub name: String,
    pub location: Option<String>,
}

impl CreateCabinRequest {
    pub fn validate(&self) -> BookingResult<()> {
        validate_text("name", &self.name, CABIN_NAME_MAX)?;
        if let Some(location) = &self.location {
            validate_location(location)?;
        }
        Ok(())
    }
}

/// Partial cabin update. An empty `location` clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCabinRequest {
    pub name: Option<String>,
    pub location: Option<String>,
}

impl UpdateCabinRequest {
    pub fn validate(&self) -> BookingResult<()> {
        if let Some(name) = &self.name {
            validate_text("name", name, CABIN_NAME_MAX)?;
        }
        if let Some(location) = &self.location {
            validate_location(location)?;
        }
        Ok(())
    }

    pub fn apply(self, cabin: &mut Cabin) {
        if let Some(name) = self.name {
            cabin.name = name;
        }
        if let Some(location) = self.location {
            cabin.location = if location.trim().is_empty() {
                None
            } else {
                Some(location)
            };
        }
    }
}

fn validate_location(location: &str) -> BookingResult<()> {
    if location.chars().count() > CABIN_LOCATION_MAX {
        return Err(BookingError::Validation(format!(
            "location must be at most {} characters",
            CABIN_LOCATION_MAX
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoomRequest {
    pub name: String,
}

impl CreateRoomRequest {
    pub fn validate(&self) -> BookingResult<()> {
        validate_text("name", &self.name, ROOM_NAME_MAX)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRoomRequest {
    pub name: String,
}

impl UpdateRoomRequest {
    pub fn validate(&self) -> BookingResult<()> {
        validate_text("name", &self.name, ROOM_NAME_MAX)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignPsychologistRequest {
    pub psychologist_id: Uuid,
}
