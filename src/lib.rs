//! Pescador library
//!
//! Forecast acquisition with provider fallback, day selection and fishing
//! condition scoring, exposed for the binary and for integration tests.

pub mod cli;
pub mod config;
pub mod data;
pub mod day;
pub mod fishing;
pub mod report;
