//! # RangeKit Core
//!
//! Core types and utilities shared by the RangeKit crates.
//! Provides the error taxonomy used when loading stage diagrams,
//! editor-wide constants, and measurement unit formatting.

pub mod constants;
pub mod error;
pub mod units;

pub use error::{DiagramError, Error, Result};
pub use units::{format_length, MeasurementSystem};
