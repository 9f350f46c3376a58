//! Integration tests
//!
//! Full requests through the router against an in-memory database.

pub mod database;
