//! Operations on the resource graph and the appointment schedule.
//!
//! Every function takes the caller's [`Identity`](crate::models::user::Identity)
//! explicitly and runs the role gate before touching storage.

pub mod resources;
pub mod scheduling;
