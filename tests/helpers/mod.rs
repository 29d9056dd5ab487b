//! Shared fixtures for integration tests.


pub use fixtures::*;
