//! Domain layer for the cabin booking service.
//!
//! Holds the identity and role model, the cabin/room/assignment/appointment
//! models, the error taxonomy, the access policy, the repository traits the
//! storage layer implements, and the services that combine them.

pub mod errors;
pub mod models;
pub mod policy;
pub mod repository;
pub mod services;
