//! # Civic Shared
//!
//! Configuration, telemetry, constants and startup errors shared by the
//! admin guard crates.

pub mod constants;
pub mod utils;
pub mod telemetry;
pub mod config;
pub mod error;

pub use config::AppConfig;
pub use error::AppError;
