//! Builds the shared inference pipeline from the startup artifacts.

use tracing::{debug, info, warn};

use crate::common::error::{SurvError, SurvResult};
use crate::features::domain::FeatureSchema;
use crate::inference::domain::{Classifier, ModelSummary, Scaler};
use crate::inference::predictor::{LinearClassifier, LinkFunction};
use crate::inference::scaler::{MinMaxScaler, StandardScaler};
use crate::inference::service::Pipeline;

use super::domain::{ArtifactRepo, ClassifierSpec, ModelInfo, ScalerSpec};

/// Model name reported when the metadata does not carry one.
pub const DEFAULT_MODEL_NAME: &str = "Regresion Logistica";

/// Load every artifact and assemble the pipeline. Any failure is fatal.
pub fn load(repo: &dyn ArtifactRepo) -> SurvResult<Pipeline> {
    let location = repo.describe();
    let info = repo.load_info()?;
    let classifier = build_classifier(repo.load_classifier()?, &location)?;
    let scaler = build_scaler(repo.load_scaler()?, &location)?;

    let schema = resolve_schema(&info, classifier.feature_names(), &location)?;

    if let Some(names) = scaler.feature_names() {
        if names != schema.names() {
            debug!("scaler was fit with different column names; applying by position");
        }
    }

    let summary = ModelSummary {
        modelo: info
            .modelo
            .clone()
            .unwrap_or_else(|| DEFAULT_MODEL_NAME.to_string()),
        n_features: info.n_features.unwrap_or(schema.len()),
    };
    if summary.n_features != schema.len() {
        warn!(
            declared = summary.n_features,
            schema = schema.len(),
            "metadata n_features disagrees with the feature list"
        );
    }

    info!(
        artifacts = %location,
        features = schema.len(),
        scaler = scaler.kind(),
        model = classifier.kind(),
        modelo = %summary.modelo,
        "artifacts loaded"
    );

    Ok(Pipeline::new(schema, scaler, classifier, summary))
}

/// Pick the feature schema: metadata first, the model's own names otherwise.
///
/// Both lists present but different is a startup failure.
pub fn resolve_schema(
    info: &ModelInfo,
    model_names: Option<&[String]>,
    location: &str,
) -> SurvResult<FeatureSchema> {
    let declared = info.features.as_deref().filter(|names| !names.is_empty());
    let model_names = model_names.filter(|names| !names.is_empty());

    let names = match (declared, model_names) {
        (Some(declared), Some(fitted)) if declared != fitted => {
            return Err(SurvError::startup(
                "metadata",
                location,
                "feature list differs from the model's fitted feature names",
            ));
        }
        (Some(declared), _) => declared.to_vec(),
        (None, Some(fitted)) => fitted.to_vec(),
        (None, None) => {
            return Err(SurvError::startup(
                "metadata",
                location,
                "no feature list in metadata or model",
            ));
        }
    };

    for (i, name) in names.iter().enumerate() {
        if names[..i].contains(name) {
            return Err(SurvError::startup(
                "metadata",
                location,
                format!("feature '{name}' listed twice"),
            ));
        }
    }

    Ok(FeatureSchema::new(names))
}

fn build_scaler(spec: ScalerSpec, location: &str) -> SurvResult<Box<dyn Scaler>> {
    let scaler: Box<dyn Scaler> = match spec {
        ScalerSpec::Standard {
            mean,
            scale,
            feature_names_in,
        } => Box::new(
            StandardScaler::new(mean, scale, feature_names_in)
                .map_err(|reason| SurvError::startup("scaler", location, reason))?,
        ),
        ScalerSpec::MinMax {
            scale,
            min,
            feature_names_in,
        } => Box::new(
            MinMaxScaler::new(scale, min, feature_names_in)
                .map_err(|reason| SurvError::startup("scaler", location, reason))?,
        ),
    };
    Ok(scaler)
}

fn build_classifier(spec: ClassifierSpec, location: &str) -> SurvResult<Box<dyn Classifier>> {
    let (params, link) = match spec {
        ClassifierSpec::LogisticRegression(params) => (params, LinkFunction::Logistic),
        ClassifierSpec::LinearSvc(params) => (params, LinkFunction::DecisionOnly),
    };
    let model = LinearClassifier::new(
        params.classes,
        params.coef,
        params.intercept,
        link,
        params.feature_names_in,
    )
    .map_err(|reason| SurvError::startup("model", location, reason))?;
    Ok(Box::new(model))
}
