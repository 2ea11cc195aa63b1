//! # vmatch Common Library
//!
//! Shared code for the sample-to-volcano matching workspace:
//! - Error type
//! - Configuration loading (TOML bootstrap with env/CLI overrides)
//! - Geographic primitives (points, great-circle distance)
//! - Input records (samples, volcano candidates) and the persisted match record

pub mod config;
pub mod error;
pub mod geo;
pub mod models;

pub use error::{Error, Result};
pub use geo::GeoPoint;
