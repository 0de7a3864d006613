pub mod appointment;
pub mod cabin;
pub mod health;
pub mod me;
