//! Public entry points: the HTTP surface over the inference pipeline.

pub mod form;
pub mod http;

pub use self::http::{router, AppState};
