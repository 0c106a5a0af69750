//! Shared vocabulary for cardiovascular survey processing.
//!
//! - **columns**: canonical column names of a survey record set
//! - **options**: thresholds and breakpoints used by the correctors
//! - **risk**: probability bands reported to the end user
//! - **error**: configuration errors

pub mod columns;
pub mod error;
pub mod options;
pub mod risk;

pub use error::{ConfigError, Result};
pub use options::{BloodPressureOptions, BodyMetricsOptions, CorrectionOptions, ValueRange};
pub use risk::RiskLevel;
