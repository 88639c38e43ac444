//! Inference orchestration: validate, scale, classify, assemble.

use std::time::Instant;

use tracing::{debug, instrument};

use crate::common::error::SurvResult;
use crate::features::domain::{FeatureSchema, InputRecord};
use crate::features::service::normalize;

use super::domain::{class_label, Classifier, ModelSummary, PredictionResult, Scaler};

/// Read-only state shared by every request.
pub struct Pipeline {
    schema: FeatureSchema,
    scaler: Box<dyn Scaler>,
    classifier: Box<dyn Classifier>,
    summary: ModelSummary,
}

impl Pipeline {
    pub fn new(
        schema: FeatureSchema,
        scaler: Box<dyn Scaler>,
        classifier: Box<dyn Classifier>,
        summary: ModelSummary,
    ) -> Self {
        Self {
            schema,
            scaler,
            classifier,
            summary,
        }
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn summary(&self) -> &ModelSummary {
        &self.summary
    }

    pub fn scaler_kind(&self) -> &'static str {
        self.scaler.kind()
    }

    pub fn classifier_kind(&self) -> &'static str {
        self.classifier.kind()
    }

    /// Run one record through the whole pipeline.
    ///
    /// Validation errors are returned before the scaler or model is touched.
    #[instrument(skip_all, fields(n_keys = record.len()))]
    pub fn infer(&self, record: &InputRecord) -> SurvResult<PredictionResult> {
        let start = Instant::now();
        let (vector, inputs) = normalize(&self.schema, record)?;
        let scaled = self.scaler.transform(vector.as_slice())?;
        let decision = self.classifier.predict(&scaled)?;

        debug!(
            class = decision.class,
            confidence = ?decision.confidence,
            latency_us = start.elapsed().as_micros() as u64,
            "inference complete"
        );

        Ok(PredictionResult {
            prediction: decision.class,
            label: class_label(decision.class),
            probability: decision.confidence,
            inputs,
            model_meta: self.summary.clone(),
        })
    }
}
