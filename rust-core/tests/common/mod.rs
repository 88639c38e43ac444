#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use hepsurv::artifacts::{self, FsArtifactRepo};
use hepsurv::common::config::AppCfg;

pub const FEATURES: [&str; 21] = [
    "Age",
    "Sex",
    "Estado_Civil",
    "Ciudad",
    "Steroid",
    "Antivirals",
    "Fatigue",
    "Malaise",
    "Anorexia",
    "Liver_Big",
    "Liver_Firm",
    "Spleen_Palpable",
    "Spiders",
    "Ascites",
    "Varices",
    "Bilirubin",
    "Alk_Phosphate",
    "Sgot",
    "Albumin",
    "Protime",
    "Histology",
];

pub fn sample_record() -> Value {
    json!({
        "Age": 45,
        "Sex": 1,
        "Estado_Civil": 1,
        "Ciudad": 2,
        "Steroid": 1,
        "Antivirals": 2,
        "Fatigue": 1,
        "Malaise": 1,
        "Anorexia": 2,
        "Liver_Big": 1,
        "Liver_Firm": 2,
        "Spleen_Palpable": 2,
        "Spiders": 2,
        "Ascites": 2,
        "Varices": 2,
        "Bilirubin": 1.2,
        "Alk_Phosphate": 85,
        "Sgot": 45,
        "Albumin": 4.0,
        "Protime": 60,
        "Histology": 1
    })
}

pub fn logistic_model(width: usize) -> Value {
    let coef: Vec<f64> = (0..width).map(|i| if i % 2 == 0 { 0.3 } else { -0.2 }).collect();
    json!({
        "kind": "logistic_regression",
        "classes": [1, 2],
        "coef": [coef],
        "intercept": [0.8]
    })
}

pub fn svc_model(width: usize) -> Value {
    json!({
        "kind": "linear_svc",
        "classes": [1, 2],
        "coef": [vec![0.1; width]],
        "intercept": [-0.5]
    })
}

/// Write metadata, a standard scaler and `model` into `dir`.
pub fn write_artifacts(dir: &Path, model: &Value) {
    let info = json!({
        "modelo": "Regresion Logistica",
        "n_features": FEATURES.len(),
        "features": FEATURES,
    });
    let scaler = json!({
        "kind": "standard",
        "mean": vec![1.5; FEATURES.len()],
        "scale": vec![2.0; FEATURES.len()],
    });
    fs::write(dir.join("info.json"), info.to_string()).expect("write info");
    fs::write(dir.join("scaler.json"), scaler.to_string()).expect("write scaler");
    fs::write(dir.join("model.json"), model.to_string()).expect("write model");
}

/// Router over freshly written artifacts; keep the `TempDir` alive for the test.
pub fn app_with_model(model: &Value) -> (TempDir, Router) {
    let dir = tempfile::tempdir().expect("tmpdir");
    write_artifacts(dir.path(), model);
    let router = app_from_dir(dir.path());
    (dir, router)
}

pub fn app_from_dir(dir: &Path) -> Router {
    let cfg = AppCfg::for_artifacts_dir(dir.display().to_string());
    let pipeline = artifacts::load(&FsArtifactRepo::new(&cfg)).expect("artifacts load");
    hepsurv::router(Arc::new(pipeline))
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request");
    send(app, request).await
}

pub async fn post_raw(app: &Router, body: impl Into<Body>) -> (StatusCode, String) {
    let request = Request::builder()
        .method("POST")
        .uri("/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .expect("request");
    send(app, request).await
}

pub async fn post_json(app: &Router, body: &Value) -> (StatusCode, Value) {
    let (status, text) = post_raw(app, body.to_string()).await;
    let value = serde_json::from_str(&text).expect("json response");
    (status, value)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.expect("infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    (status, String::from_utf8(bytes.to_vec()).expect("utf8 body"))
}
