//! On-disk artifact documents produced by the offline training job.

use serde::Deserialize;

use crate::common::error::SurvResult;

/// Metadata document. Unknown keys are ignored.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ModelInfo {
    #[serde(default)]
    pub features: Option<Vec<String>>,
    #[serde(default)]
    pub modelo: Option<String>,
    #[serde(default)]
    pub n_features: Option<usize>,
}

/// Fitted scaler parameters, tagged by `kind`.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScalerSpec {
    Standard {
        #[serde(default)]
        mean: Option<Vec<f64>>,
        #[serde(default)]
        scale: Option<Vec<f64>>,
        #[serde(default)]
        feature_names_in: Option<Vec<String>>,
    },
    MinMax {
        scale: Vec<f64>,
        min: Vec<f64>,
        #[serde(default)]
        feature_names_in: Option<Vec<String>>,
    },
}

/// Fitted classifier parameters, tagged by `kind`.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierSpec {
    LogisticRegression(LinearParams),
    LinearSvc(LinearParams),
}

/// Coefficients shared by the linear classifier kinds.
#[derive(Clone, Debug, Deserialize)]
pub struct LinearParams {
    pub classes: Vec<i64>,
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
    #[serde(default)]
    pub feature_names_in: Option<Vec<String>>,
}

/// Source of the three startup artifacts.
pub trait ArtifactRepo {
    fn load_info(&self) -> SurvResult<ModelInfo>;
    fn load_scaler(&self) -> SurvResult<ScalerSpec>;
    fn load_classifier(&self) -> SurvResult<ClassifierSpec>;
    /// Human readable location of the artifacts, for logs.
    fn describe(&self) -> String;
}
