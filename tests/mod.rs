//! Test suite for the FF Codex auth service
//!
//! This module organizes all integration and property tests

pub mod common;
pub mod integration;
pub mod property;
