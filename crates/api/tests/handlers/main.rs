//! HTTP-level tests running the full router over the in-memory store.

mod test_utils;

mod appointment_test;
mod assignment_test;
mod cabin_test;
mod middleware_test;
mod request_validation_test;
