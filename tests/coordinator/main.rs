//! Coordinator integration tests.

mod client;
