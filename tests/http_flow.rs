use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use pricer::{
    api::{create_router, AppState},
    config::AppConfig,
    error::Result,
    ml::{DenseLayer, DenseNetwork, Predictor},
    persistence::csv::parse,
};
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};
use tempfile::TempDir;
use tower::ServiceExt;

/// Predictor returning a fixed value regardless of input.
struct FixedPredictor(f64);

impl Predictor for FixedPredictor {
    fn predict(&self, _features: &[f64]) -> Result<f64> {
        Ok(self.0)
    }
}

struct Harness {
    dir: TempDir,
    app: Router,
}

impl Harness {
    fn new(predictor: Arc<dyn Predictor>) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut config = AppConfig::default_config();
        config.paths.results = dir.path().join("results").join("model_evaluation_results.csv");
        config.paths.prediction_log = dir.path().join("data").join("predictions_log.csv");
        let app = create_router(AppState::new(&config, predictor));
        Self { dir, app }
    }

    fn log_path(&self) -> PathBuf {
        self.dir.path().join("data").join("predictions_log.csv")
    }

    fn write_results(&self, contents: &str) {
        let path = self.dir.path().join("results").join("model_evaluation_results.csv");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }

    async fn get(&self, uri: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        send(self.app.clone(), request).await
    }

    async fn post_form(&self, body: &str) -> (StatusCode, String) {
        self.post_predict(Some("application/x-www-form-urlencoded"), body.as_bytes().to_vec())
            .await
    }

    async fn post_predict(&self, content_type: Option<&str>, body: Vec<u8>) -> (StatusCode, String) {
        let mut builder = Request::builder().method(Method::POST).uri("/predict");
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        let request = builder.body(Body::from(body)).unwrap();
        send(self.app.clone(), request).await
    }
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(request).await.expect("router response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn log_rows(path: &Path) -> Vec<Vec<String>> {
    parse(&std::fs::read_to_string(path).unwrap())
}

const VALID_FORM: &str = "avg_income=65000&house_age=6&rooms=7&bedrooms=4&population=35000";

#[tokio::test]
async fn index_renders_form() {
    let h = Harness::new(Arc::new(FixedPredictor(1.0)));
    let (status, body) = h.get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<form method=\"post\" action=\"/predict\">"));
}

#[tokio::test]
async fn accepted_prediction_is_rendered_and_logged_once() {
    let h = Harness::new(Arc::new(FixedPredictor(1_234_567.891)));

    let (status, body) = h.post_form(VALID_FORM).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("$1,234,567.89"), "{body}");
    assert!(body.contains("Best Model (LinearRegression)"));
    assert!(body.contains("<td>35000</td>"));

    let rows = log_rows(&h.log_path());
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].len(), 7);
    assert_eq!(rows[1][1..], ["65000", "6", "7", "4", "35000", "1234567.891"]);
}

#[tokio::test]
async fn negative_prediction_renders_as_zero() {
    let h = Harness::new(Arc::new(FixedPredictor(-5000.0)));

    let (_, body) = h.post_form(VALID_FORM).await;
    assert!(body.contains("$0.00"));
    assert!(!body.contains("-$"));

    let rows = log_rows(&h.log_path());
    assert_eq!(rows[1][6], "0");
}

#[tokio::test]
async fn non_positive_fields_warn_and_do_not_log() {
    let h = Harness::new(Arc::new(FixedPredictor(100.0)));

    for form in [
        "avg_income=0&house_age=6&rooms=7&bedrooms=4&population=35000",
        "avg_income=65000&house_age=-2&rooms=7&bedrooms=4&population=35000",
        "avg_income=65000&house_age=6&rooms=0&bedrooms=4&population=35000",
        "avg_income=65000&house_age=6&rooms=7&bedrooms=-4&population=35000",
        "avg_income=65000&house_age=6&rooms=7&bedrooms=4&population=0",
    ] {
        let (status, body) = h.post_form(form).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Please enter valid positive values."), "{form}");
    }
    assert!(!h.log_path().exists());
}

#[tokio::test]
async fn malformed_and_missing_fields_render_errors() {
    let h = Harness::new(Arc::new(FixedPredictor(100.0)));

    let (status, body) = h
        .post_form("avg_income=abc&house_age=6&rooms=7&bedrooms=4&population=35000")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Error: could not convert string to float: &#39;abc&#39;"));

    let (status, body) = h.post_form("avg_income=65000&house_age=6").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Error: missing form field: rooms"));

    assert!(!h.log_path().exists());

    // The server keeps serving after bad requests.
    let (status, _) = h.post_form(VALID_FORM).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(log_rows(&h.log_path()).len(), 2);
}

#[tokio::test]
async fn undecodable_bodies_render_error_page() {
    let h = Harness::new(Arc::new(FixedPredictor(100.0)));

    let cases: [(Option<&str>, Vec<u8>); 3] = [
        (None, Vec::new()),
        (Some("application/json"), br#"{"avg_income": 65000}"#.to_vec()),
        (
            Some("application/x-www-form-urlencoded"),
            b"avg_income=\xff\xfe&house_age=6&rooms=7&bedrooms=4&population=35000".to_vec(),
        ),
    ];
    for (content_type, body) in cases {
        let (status, page) = h.post_predict(content_type, body).await;
        assert_eq!(status, StatusCode::OK, "{content_type:?}");
        assert!(page.starts_with("<!DOCTYPE html>"), "{page}");
        assert!(page.contains("<p class=\"error\">Error: "), "{page}");
    }
    assert!(!h.log_path().exists());
}

#[tokio::test]
async fn duplicate_fields_use_first_value() {
    let h = Harness::new(Arc::new(FixedPredictor(100.0)));

    let (status, body) = h
        .post_form(&format!("{VALID_FORM}&avg_income=abc&rooms=-1"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("$100.00"), "{body}");

    let rows = log_rows(&h.log_path());
    assert_eq!(rows[1][1..], ["65000", "6", "7", "4", "35000", "100"]);
}

#[tokio::test]
async fn negative_zero_prediction_renders_unsigned() {
    let h = Harness::new(Arc::new(FixedPredictor(-0.0)));

    let (_, body) = h.post_form(VALID_FORM).await;
    assert!(body.contains("$0.00"));
    assert!(!body.contains("-$"));
    assert_eq!(log_rows(&h.log_path())[1][6], "0");
}

#[tokio::test]
async fn log_has_one_header_for_many_predictions() {
    let h = Harness::new(Arc::new(FixedPredictor(250_000.0)));

    for _ in 0..5 {
        h.post_form(VALID_FORM).await;
    }

    let rows = log_rows(&h.log_path());
    assert_eq!(rows.len(), 6);
    assert_eq!(rows.iter().filter(|r| r[0] == "timestamp").count(), 1);
    assert_eq!(rows[0][6], "Predicted Price");
}

#[tokio::test]
async fn results_highlight_best_r2_in_any_position() {
    let h = Harness::new(Arc::new(FixedPredictor(1.0)));

    let orders = [
        ["LinearRegression,81000,101000,0.85", "RandomForest,70000,90000,0.91", "DecisionTree,95000,120000,0.78"],
        ["RandomForest,70000,90000,0.91", "LinearRegression,81000,101000,0.85", "DecisionTree,95000,120000,0.78"],
        ["LinearRegression,81000,101000,0.85", "DecisionTree,95000,120000,0.78", "RandomForest,70000,90000,0.91"],
    ];
    for rows in orders {
        h.write_results(&format!("Model,MAE,RMSE,R2\n{}\n", rows.join("\n")));

        let (status, body) = h.get("/results").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.matches("<tr class=\"highlight\">").count(), 1);
        assert!(body.contains("<tr class=\"highlight\"><td>RandomForest</td><td>70,000.00</td><td>90,000.00</td><td>0.9100</td></tr>"));
    }
}

#[tokio::test]
async fn results_without_file_show_placeholder() {
    let h = Harness::new(Arc::new(FixedPredictor(1.0)));
    let (status, body) = h.get("/results").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No evaluation results found."));
    assert!(!body.contains("<table"));
}

#[tokio::test]
async fn malformed_results_degrade_in_page() {
    let h = Harness::new(Arc::new(FixedPredictor(1.0)));
    h.write_results("Model,MAE,RMSE\nRidge,1,2\n");

    let (status, body) = h.get("/results").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Could not read evaluation results"));
}

#[tokio::test]
async fn dense_network_artifact_serves_through_router() {
    let network = DenseNetwork {
        input_dim: 5,
        feature_names: None,
        input_mean: None,
        input_std: None,
        layers: vec![DenseLayer {
            weights: vec![vec![10.0, 1000.0, 0.0, 0.0, 1.0]],
            bias: vec![-100.0],
            activation: Default::default(),
        }],
        metadata: serde_json::json!({ "name": "LinearRegression" }),
    };
    let h = Harness::new(Arc::new(network));

    // 10 * 65000 + 1000 * 6 + 35000 - 100
    let (_, body) = h.post_form(VALID_FORM).await;
    assert!(body.contains("$690,900.00"), "{body}");
}

#[tokio::test]
async fn health_reports_model() {
    let h = Harness::new(Arc::new(FixedPredictor(1.0)));
    let (status, body) = h.get("/health").await;
    assert_eq!(status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["model"], "Best Model (LinearRegression)");
}
