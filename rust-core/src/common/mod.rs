//! Shared utilities that glue the different domains together.
pub mod config;
pub mod error;
pub mod log;

pub use error::{SurvCode, SurvError, SurvResult};
