pub mod appointment;
pub mod assignment;
pub mod cabin;
pub mod me;
pub mod room;
