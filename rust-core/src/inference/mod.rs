//! Inference domain: scaler and classifier adapters plus the request pipeline.

pub mod domain;
pub mod predictor;
pub mod scaler;
pub mod service;

pub use domain::{class_label, ClassDecision, Classifier, ModelSummary, PredictionResult, Scaler};
pub use service::Pipeline;
