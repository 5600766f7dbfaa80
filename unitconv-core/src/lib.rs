//! unitconv Core - shared types
//!
//! This crate provides the types every unitconv crate agrees on:
//! - `UnitconvError`: Structured, user-facing errors
//! - `format`: Significant-digit and unit-label formatting for display

mod error;
pub mod format;

pub use error::{UnitconvError, Severity, codes};
pub use format::{format_significant, format_unit, DEFAULT_SIGFIGS};

