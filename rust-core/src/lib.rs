// lib.rs - central orchestrator
pub mod api;
pub mod artifacts;
pub mod common;
pub mod features;
pub mod inference;

pub use api::router;
pub use common::{SurvCode, SurvError, SurvResult};
pub use inference::{Pipeline, PredictionResult};
