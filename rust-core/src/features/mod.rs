//! Feature domain: schema, request records and their validation.

pub mod domain;
pub mod service;

pub use domain::{FeatureSchema, FeatureVector, InputRecord, NormalizedInputs, ValidationError};
pub use service::normalize;
