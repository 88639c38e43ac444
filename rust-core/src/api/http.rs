//! HTTP routes: health check, prediction and the manual test form.

use std::any::Any;
use std::collections::BTreeMap;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use http_body_util::Full;
use serde::Serialize;
use serde_json::value::RawValue;
use serde_json::{json, Value};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::common::error::SurvError;
use crate::features::domain::InputRecord;
use crate::inference::domain::PredictionResult;
use crate::inference::service::Pipeline;

use super::form;

/// Shared, read-only handler state.
#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<Pipeline>,
    form_html: Arc<str>,
}

impl AppState {
    pub fn new(pipeline: Arc<Pipeline>) -> Self {
        let form_html = form::render(pipeline.schema(), pipeline.summary()).into();
        Self {
            pipeline,
            form_html,
        }
    }
}

/// Build the router serving every route.
pub fn router(pipeline: Arc<Pipeline>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/predict", post(predict))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::new(pipeline))
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// GET /
async fn index(State(state): State<AppState>) -> Html<String> {
    Html(state.form_html.to_string())
}

/// POST /predict
async fn predict(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PredictionResult>, SurvError> {
    let record = parse_record(&body);
    let result = state.pipeline.infer(&record)?;
    info!(
        prediction = result.prediction,
        label = %result.label,
        probability = ?result.probability,
        "prediction served"
    );
    Ok(Json(result))
}

/// Anything that is not a JSON object counts as an empty record.
///
/// Members are parsed one by one, so a value `Value` cannot hold (a number
/// outside the f64 range) is kept as its source text and rejected later by
/// field name.
fn parse_record(body: &[u8]) -> InputRecord {
    let Ok(members) = serde_json::from_slice::<BTreeMap<String, Box<RawValue>>>(body) else {
        return InputRecord::new();
    };
    members
        .into_iter()
        .map(|(name, raw)| {
            let value = serde_json::from_str(raw.get())
                .unwrap_or_else(|_| Value::String(raw.get().to_string()));
            (name, value)
        })
        .collect()
}

impl IntoResponse for SurvError {
    fn into_response(self) -> Response {
        let code = self.code() as u32;
        if self.is_client_error() {
            warn!(code, error = %self, "rejected prediction request");
            let body = json!({ "error": self.to_string() });
            (StatusCode::BAD_REQUEST, Json(body)).into_response()
        } else {
            error!(code, error = %self, "prediction failed");
            let body = json!({ "error": "internal error", "detail": self.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response<Full<Bytes>> {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!(%detail, "request handler panicked");

    let body = json!({ "error": "internal error", "detail": detail }).to_string();
    let mut response = Response::new(Full::from(body));
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    response
}
