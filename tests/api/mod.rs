//! API Endpoint Tests

mod events_tests;
mod health_tests;
