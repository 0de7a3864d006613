/// Bearer token verification and the authenticated-caller extractors
pub mod auth;
/// Mapping from domain errors to HTTP responses
pub mod error_handling;
/// Body and path extractors that report failures as validation errors
pub mod extract;
