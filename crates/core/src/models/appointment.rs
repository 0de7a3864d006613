use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

use super::validate_text;
use crate::errors::{BookingError, BookingResult};

pub const CLIENT_NAME_MAX: usize = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }

    /// Pending may move to confirmed or cancelled; both of those are final.
    /// Re-stating the current status is always accepted.
    pub fn can_transition_to(self, next: AppointmentStatus) -> bool {
        use AppointmentStatus::*;
        match (self, next) {
            (current, next) if current == next => true,
            (Pending, Confirmed) | (Pending, Cancelled) => true,
            _ => false,
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(AppointmentStatus::Pending),
            "confirmed" => Ok(AppointmentStatus::Confirmed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            other => Err(BookingError::Validation(format!(
                "Unknown appointment status: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub cabin_id: Uuid,
    pub psychologist_id: Uuid,
    pub client_name: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A fully resolved appointment ready to be inserted. New appointments are
/// always stored as pending.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAppointment {
    pub cabin_id: Uuid,
    pub psychologist_id: Uuid,
    pub client_name: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    pub client_name: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: Option<NaiveTime>,
    pub notes: Option<String>,
}

impl CreateAppointmentRequest {
    /// Validates the payload and returns the effective end time.
    pub fn resolve_end_time(&self) -> BookingResult<NaiveTime> {
        validate_text("client_name", &self.client_name, CLIENT_NAME_MAX)?;
        let end_time = match self.end_time {
            Some(end_time) => end_time,
            None => default_end_time(self.start_time)?,
        };
        validate_time_range(self.start_time, end_time)?;
        Ok(end_time)
    }
}

/// Partial appointment update.
///
/// Has no owner field. The psychologist of an appointment never changes and
/// unknown payload keys are dropped. An empty `notes` clears them; an absent
/// or null `notes` leaves them as they are.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAppointmentRequest {
    pub client_name: Option<String>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub status: Option<AppointmentStatus>,
    pub notes: Option<String>,
}

impl UpdateAppointmentRequest {
    /// Applies the changes onto `appointment`, validating the result.
    pub fn apply(self, appointment: &mut Appointment) -> BookingResult<()> {
        if let Some(client_name) = self.client_name {
            validate_text("client_name", &client_name, CLIENT_NAME_MAX)?;
            appointment.client_name = client_name;
        }
        if let Some(status) = self.status {
            if !appointment.status.can_transition_to(status) {
                return Err(BookingError::Validation(format!(
                    "Cannot change appointment status from {} to {}",
                    appointment.status, status
                )));
            }
            appointment.status = status;
        }
        if let Some(date) = self.date {
            appointment.date = date;
        }
        if let Some(start_time) = self.start_time {
            appointment.start_time = start_time;
        }
        if let Some(end_time) = self.end_time {
            appointment.end_time = end_time;
        }
        if let Some(notes) = self.notes {
            appointment.notes = if notes.trim().is_empty() {
                None
            } else {
                Some(notes)
            };
        }
        validate_time_range(appointment.start_time, appointment.end_time)
    }
}

/// One hour after `start_time` on the same day.
///
/// Starts after 23:00 would roll past midnight; those are rejected instead of
/// wrapping to the early morning.
pub fn default_end_time(start_time: NaiveTime) -> BookingResult<NaiveTime> {
    let (end_time, wrapped_seconds) = start_time.overflowing_add_signed(Duration::hours(1));
    if wrapped_seconds != 0 {
        return Err(BookingError::Validation(format!(
            "end_time is required when start_time {} is within an hour of midnight",
            start_time
        )));
    }
    Ok(end_time)
}

pub fn validate_time_range(start_time: NaiveTime, end_time: NaiveTime) -> BookingResult<()> {
    if end_time <= start_time {
        return Err(BookingError::Validation(format!(
            "end_time {} must be after start_time {}",
            end_time, start_time
        )));
    }
    Ok(())
}
