//! Core shared library for the worklog service.
//!
//! Holds the pieces the HTTP layer leans on but does not own: environment
//! configuration, the Postgres storage gateway, the canonical error types and
//! tracing setup.

pub mod config;
pub mod db;
pub mod errors;
pub mod logging;

pub use errors::{ConfigError, Result as CoreResult, WorklogError};
