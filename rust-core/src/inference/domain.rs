//! Domain definitions for inference: adapter traits and the prediction result.

use serde::Serialize;

use crate::common::error::SurvResult;
use crate::features::domain::NormalizedInputs;

/// Label for class 1 in the training data.
pub const LABEL_DECEASED: &str = "deceased";
/// Label for class 2 in the training data.
pub const LABEL_SURVIVES: &str = "survives";

/// Human readable label for a predicted class.
///
/// Only classes 1 and 2 are translated; anything else is echoed as its number.
pub fn class_label(class: i64) -> String {
    match class {
        1 => LABEL_DECEASED.to_string(),
        2 => LABEL_SURVIVES.to_string(),
        other => other.to_string(),
    }
}

/// Pre-fit row transform applied before the classifier.
pub trait Scaler: Send + Sync {
    fn kind(&self) -> &'static str;
    fn transform(&self, row: &[f64]) -> SurvResult<Vec<f64>>;
    /// Column names seen at fit time, when recorded.
    fn feature_names(&self) -> Option<&[String]> {
        None
    }
}

/// Class decision for one row.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ClassDecision {
    pub class: i64,
    /// Maximum class probability; `None` when the model has no probability estimates.
    pub confidence: Option<f64>,
}

/// Pre-fit classifier.
pub trait Classifier: Send + Sync {
    fn kind(&self) -> &'static str;
    fn predict(&self, row: &[f64]) -> SurvResult<ClassDecision>;
    /// Column names seen at fit time, when recorded.
    fn feature_names(&self) -> Option<&[String]> {
        None
    }
}

/// Model description echoed in every response.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ModelSummary {
    pub modelo: String,
    pub n_features: usize,
}

/// Response body of a successful prediction.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PredictionResult {
    pub prediction: i64,
    pub label: String,
    pub probability: Option<f64>,
    pub inputs: NormalizedInputs,
    pub model_meta: ModelSummary,
}
