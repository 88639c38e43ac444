mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::{json, Value};

use common::{
    app_with_model, get, logistic_model, post_json, post_raw, sample_record, svc_model, FEATURES,
};
use hepsurv::features::FeatureSchema;
use hepsurv::inference::scaler::StandardScaler;
use hepsurv::inference::{ClassDecision, Classifier, ModelSummary, Pipeline};
use hepsurv::SurvResult;

#[tokio::test]
async fn health_is_always_ok() {
    let (_dir, app) = app_with_model(&logistic_model(FEATURES.len()));

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), json!({"status": "ok"}));

    let (status, _) = post_json(&app, &json!({"Age": 45})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), json!({"status": "ok"}));
}

#[tokio::test]
async fn full_record_is_predicted() {
    let (_dir, app) = app_with_model(&logistic_model(FEATURES.len()));

    let (status, body) = post_json(&app, &sample_record()).await;
    assert_eq!(status, StatusCode::OK);

    assert!(body["prediction"].is_i64());
    let label = body["label"].as_str().unwrap();
    assert!(label == "deceased" || label == "survives", "label {label}");
    let probability = body["probability"].as_f64().unwrap();
    assert!((0.5..=1.0).contains(&probability));

    assert_eq!(body["inputs"]["Age"], 45.0);
    assert_eq!(body["inputs"]["Bilirubin"], 1.2);
    assert_eq!(body["inputs"].as_object().unwrap().len(), FEATURES.len());

    assert_eq!(body["model_meta"]["modelo"], "Regresion Logistica");
    assert_eq!(body["model_meta"]["n_features"], 21);
}

#[tokio::test]
async fn label_matches_prediction() {
    let (_dir, app) = app_with_model(&logistic_model(FEATURES.len()));
    let (_, body) = post_json(&app, &sample_record()).await;
    let expected = match body["prediction"].as_i64().unwrap() {
        1 => "deceased",
        2 => "survives",
        other => panic!("unexpected class {other}"),
    };
    assert_eq!(body["label"], expected);
}

#[tokio::test]
async fn key_order_does_not_matter() {
    let (_dir, app) = app_with_model(&logistic_model(FEATURES.len()));
    let forward = sample_record();
    let mut reversed = serde_json::Map::new();
    for name in FEATURES.iter().rev() {
        reversed.insert(name.to_string(), forward[name].clone());
    }

    let (_, a) = post_json(&app, &forward).await;
    let (_, b) = post_json(&app, &Value::Object(reversed)).await;
    assert_eq!(a, b);
}

#[tokio::test]
async fn repeated_requests_are_identical() {
    let (_dir, app) = app_with_model(&logistic_model(FEATURES.len()));
    let (_, first) = post_raw(&app, sample_record().to_string()).await;
    let (_, second) = post_raw(&app, sample_record().to_string()).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn missing_fields_are_all_listed() {
    let (_dir, app) = app_with_model(&logistic_model(FEATURES.len()));

    let (status, body) = post_json(&app, &json!({"Age": 45})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().unwrap();
    assert!(message.starts_with("missing fields: "));
    for name in &FEATURES[1..] {
        assert!(message.contains(name), "{name} not in {message}");
    }
    assert!(!message.contains("Age"));
    assert!(body.get("detail").is_none());
}

#[tokio::test]
async fn non_numeric_value_names_the_field() {
    let (_dir, app) = app_with_model(&logistic_model(FEATURES.len()));
    let mut record = sample_record();
    record["Age"] = json!("not-a-number");

    let (status, body) = post_json(&app, &record).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid value for 'Age': not-a-number");
}

#[tokio::test]
async fn out_of_range_number_names_the_field() {
    let (_dir, app) = app_with_model(&logistic_model(FEATURES.len()));
    let body = sample_record().to_string().replace(r#""Age":45,"#, r#""Age":1e400,"#);
    assert!(body.contains("1e400"));

    let (status, text) = post_raw(&app, body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let value: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["error"], "invalid value for 'Age': 1e400");
}

#[tokio::test]
async fn numeric_strings_are_accepted() {
    let (_dir, app) = app_with_model(&logistic_model(FEATURES.len()));
    let mut record = sample_record();
    record["Age"] = json!("45");
    record["Albumin"] = json!(" 4.0 ");

    let (status, body) = post_json(&app, &record).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["inputs"]["Age"], 45.0);
    assert_eq!(body["inputs"]["Albumin"], 4.0);
}

#[tokio::test]
async fn empty_form_values_are_invalid() {
    let (_dir, app) = app_with_model(&logistic_model(FEATURES.len()));
    let mut record = sample_record();
    record["Sgot"] = Value::Null;

    let (status, body) = post_json(&app, &record).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid value for 'Sgot': null");
}

#[tokio::test]
async fn unparseable_body_is_an_empty_record() {
    let (_dir, app) = app_with_model(&logistic_model(FEATURES.len()));

    for body in ["", "not json", "[1,2,3]"] {
        let (status, text) = post_raw(&app, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let value: Value = serde_json::from_str(&text).unwrap();
        let message = value["error"].as_str().unwrap();
        assert!(message.starts_with("missing fields: Age, Sex"), "{message}");
    }
}

#[tokio::test]
async fn decision_only_model_has_null_probability() {
    let (_dir, app) = app_with_model(&svc_model(FEATURES.len()));

    let (status, body) = post_json(&app, &sample_record()).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["probability"].is_null());
    assert!(body["prediction"].is_i64());
}

#[tokio::test]
async fn shape_mismatch_is_a_server_error() {
    let (_dir, app) = app_with_model(&logistic_model(FEATURES.len() - 1));

    let (status, body) = post_json(&app, &sample_record()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "internal error");
    assert_eq!(body["detail"], "model expects 20 features, got 21");

    let (status, _) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn unknown_class_passes_through_as_number() {
    let model = json!({
        "kind": "logistic_regression",
        "classes": [0, 7],
        "coef": [vec![0.0; FEATURES.len()]],
        "intercept": [5.0]
    });
    let (_dir, app) = app_with_model(&model);

    let (status, body) = post_json(&app, &sample_record()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["prediction"], 7);
    assert_eq!(body["label"], "7");
}

#[tokio::test]
async fn form_lists_every_field() {
    let (_dir, app) = app_with_model(&logistic_model(FEATURES.len()));

    let (status, html) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    for name in FEATURES {
        assert!(html.contains(&format!(r#"name="{name}""#)), "{name} missing");
    }
    assert!(html.contains("fetch('/predict'"));
}

#[tokio::test]
async fn panicking_model_is_isolated_to_its_request() {
    struct Exploding;
    impl Classifier for Exploding {
        fn kind(&self) -> &'static str {
            "exploding"
        }
        fn predict(&self, _: &[f64]) -> SurvResult<ClassDecision> {
            panic!("coefficient table corrupted")
        }
    }

    let pipeline = Pipeline::new(
        FeatureSchema::new(vec!["Age".to_string()]),
        Box::new(StandardScaler::new(None, None, None).unwrap()),
        Box::new(Exploding),
        ModelSummary {
            modelo: "exploding".to_string(),
            n_features: 1,
        },
    );
    let app = hepsurv::router(Arc::new(pipeline));

    let (status, body) = post_json(&app, &json!({"Age": 45})).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "internal error");
    assert_eq!(body["detail"], "coefficient table corrupted");

    let (status, _) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
}
