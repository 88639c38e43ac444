//! Artifact domain: the offline-produced metadata, scaler and model documents.

pub mod domain;
pub mod repo_fs;
pub mod service;

pub use domain::{ArtifactRepo, ClassifierSpec, ModelInfo, ScalerSpec};
pub use repo_fs::FsArtifactRepo;
pub use service::load;
