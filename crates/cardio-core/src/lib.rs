//! Correction pipeline for cardio survey data.
//!
//! [`FeaturePipeline`] chains the body metrics and blood pressure
//! correctors in front of a [`RiskModel`]. The model itself is opaque: any
//! classifier that can be fitted on the corrected feature frame and return
//! one probability per record plugs in.

pub mod model;
pub mod pipeline;

pub use model::{Assessment, RiskModel};
pub use pipeline::{Correction, FeaturePipeline};
