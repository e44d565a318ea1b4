//! `hilo` - Read-only HTTP API over climate observation records
//!
//! This library provides the date-window query logic over a pre-populated
//! observations database, plus the thin HTTP surface that exposes it.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod storage;
pub mod web;
pub mod window;

// Re-export core types for public API
pub use config::HiloConfig;
pub use error::HiloError;
pub use models::{Observation, Station};
pub use window::{DateWindow, PrecipitationMode};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, HiloError>;
