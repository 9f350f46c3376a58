//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - In-memory database and router fixture
//! - Authentication test helpers
//! - Custom assertion macros

pub mod assertions;

// Re-export commonly used utilities
pub use auth_helpers::*;
pub use database::*;
