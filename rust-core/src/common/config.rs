//! Runtime configuration loaded from the environment.
//!
//! Host and port may additionally be overridden from the command line by the
//! binary; everything else is environment only.

use std::env;
use std::path::{Path, PathBuf};

/// Snapshot of configuration values consumed by the core.
#[derive(Clone, Debug)]
pub struct AppCfg {
    pub host: String,
    pub port: u16,
    pub artifacts_dir: String,
    pub model_file: String,
    pub scaler_file: String,
    pub info_file: String,
    pub log_filter: String,
    pub log_format: LogFormat,
}

/// Output format for log lines.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }
}

impl AppCfg {
    /// Create a configuration snapshot from the process environment.
    pub fn load() -> Self {
        fn env_or(key: &str, default: &str) -> String {
            env::var(key).unwrap_or_else(|_| default.to_string())
        }

        Self {
            host: env_or("HEPSURV_HOST", "0.0.0.0"),
            port: env_or("HEPSURV_PORT", "5000").parse().unwrap_or(5000),
            artifacts_dir: env_or("HEPSURV_ARTIFACTS_DIR", "./archivos"),
            model_file: env_or("HEPSURV_MODEL_FILE", "model.json"),
            scaler_file: env_or("HEPSURV_SCALER_FILE", "scaler.json"),
            info_file: env_or("HEPSURV_INFO_FILE", "info.json"),
            log_filter: env_or("HEPSURV_LOG", "info"),
            log_format: LogFormat::parse(&env_or("HEPSURV_LOG_FORMAT", "text")),
        }
    }

    /// Configuration rooted at `dir` with default file names.
    pub fn for_artifacts_dir(dir: impl Into<String>) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            artifacts_dir: dir.into(),
            model_file: "model.json".to_string(),
            scaler_file: "scaler.json".to_string(),
            info_file: "info.json".to_string(),
            log_filter: "info".to_string(),
            log_format: LogFormat::Text,
        }
    }

    pub fn model_path(&self) -> PathBuf {
        self.resolve(&self.model_file)
    }

    pub fn scaler_path(&self) -> PathBuf {
        self.resolve(&self.scaler_file)
    }

    pub fn info_path(&self) -> PathBuf {
        self.resolve(&self.info_file)
    }

    /// Address the HTTP listener binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    // Absolute file names bypass the artifacts directory.
    fn resolve(&self, file: &str) -> PathBuf {
        let path = Path::new(file);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            Path::new(&self.artifacts_dir).join(path)
        }
    }
}
