//! Filesystem repository for the startup artifacts.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::common::config::AppCfg;
use crate::common::error::{SurvError, SurvResult};

use super::domain::{ArtifactRepo, ClassifierSpec, ModelInfo, ScalerSpec};

/// Reads JSON artifacts from the paths named in the configuration.
pub struct FsArtifactRepo {
    info_path: PathBuf,
    scaler_path: PathBuf,
    model_path: PathBuf,
}

impl FsArtifactRepo {
    pub fn new(cfg: &AppCfg) -> Self {
        Self {
            info_path: cfg.info_path(),
            scaler_path: cfg.scaler_path(),
            model_path: cfg.model_path(),
        }
    }
}

impl ArtifactRepo for FsArtifactRepo {
    fn load_info(&self) -> SurvResult<ModelInfo> {
        read_json("metadata", &self.info_path)
    }

    fn load_scaler(&self) -> SurvResult<ScalerSpec> {
        read_json("scaler", &self.scaler_path)
    }

    fn load_classifier(&self) -> SurvResult<ClassifierSpec> {
        read_json("model", &self.model_path)
    }

    fn describe(&self) -> String {
        format!(
            "info={} scaler={} model={}",
            self.info_path.display(),
            self.scaler_path.display(),
            self.model_path.display()
        )
    }
}

fn read_json<T: DeserializeOwned>(artifact: &'static str, path: &Path) -> SurvResult<T> {
    let bytes = fs::read(path)
        .map_err(|err| SurvError::startup(artifact, path.display().to_string(), err))?;
    // Undecodable bytes are replaced, not rejected.
    let text = String::from_utf8_lossy(&bytes);
    serde_json::from_str(&text)
        .map_err(|err| SurvError::startup(artifact, path.display().to_string(), err))
}
