//! RangeKit Settings Crate
//!
//! Handles stage-editor configuration and its persistence.

pub mod config;
pub mod error;

pub use config::EditorSettings;
pub use error::{SettingsError, SettingsResult};
pub use rangekit_core::units::MeasurementSystem;
