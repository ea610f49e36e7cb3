pub mod health;
pub mod index;

use axum::{
    routing::{get, post},
    Router,
};

use crate::colleges::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index::index_handler))
        .route("/health", get(health::health_handler))
        .route("/predict", post(handlers::handle_predict))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use crate::config::Config;

    const JUNIOR_CSV: &str = "\
college_name,category,cutoff_10th
Fergusson College,a,75
SP College,A,90
Modern College,b,60
";

    const ENGINEERING_CSV: &str = "\
college_name,category,cutoff_cet
COEP,A,180
VJTI,a,40
";

    fn app(data_dir: &Path) -> Router {
        build_router(AppState {
            config: Config {
                port: 0,
                rust_log: "info".to_string(),
                data_dir: data_dir.to_path_buf(),
            },
        })
    }

    fn seeded_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("junior_colleges.csv"), JUNIOR_CSV).unwrap();
        std::fs::write(dir.path().join("engineering_colleges.csv"), ENGINEERING_CSV).unwrap();
        dir
    }

    async fn post_predict(app: Router, body: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/predict")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_junior_match_includes_row_with_uniform_cutoff() {
        let dir = seeded_dir();
        let (status, body) = post_predict(
            app(dir.path()),
            r#"{"college_type": "junior", "marks": 80, "category": "A"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([{"college_name": "Fergusson College", "category": "A", "cutoff": 75}])
        );
    }

    #[tokio::test]
    async fn test_engineering_without_category_match_is_empty_array() {
        let dir = seeded_dir();
        let (status, body) = post_predict(
            app(dir.path()),
            r#"{"college_type": "engineering", "marks": 50, "category": "B"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_engineering_cutoff_is_renamed() {
        let dir = seeded_dir();
        let (status, body) = post_predict(
            app(dir.path()),
            r#"{"college_type": "engineering", "marks": "200", "category": "a"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["college_name"], json!("COEP"));
        assert_eq!(body[0]["cutoff"], json!(180));
        assert_eq!(body[1]["cutoff"], json!(40));
        assert!(body[0].get("cutoff_cet").is_none());
    }

    #[tokio::test]
    async fn test_unknown_college_type_is_server_error() {
        let dir = seeded_dir();
        let (status, body) = post_predict(
            app(dir.path()),
            r#"{"college_type": "other", "marks": 80, "category": "A"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Could not load data for other colleges."}));
    }

    #[tokio::test]
    async fn test_missing_marks_is_client_error() {
        // Empty directory: a request that got past validation would fail with 500.
        let dir = TempDir::new().unwrap();
        let (status, body) = post_predict(
            app(dir.path()),
            r#"{"college_type": "junior", "category": "A"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Invalid input. Please check your entries."}));
    }

    #[tokio::test]
    async fn test_non_numeric_marks_is_client_error() {
        let dir = seeded_dir();
        let (status, body) = post_predict(
            app(dir.path()),
            r#"{"college_type": "junior", "marks": "eighty", "category": "A"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_malformed_json_is_client_error() {
        let dir = seeded_dir();
        let (status, body) = post_predict(app(dir.path()), "{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_missing_data_file_is_server_error() {
        let dir = TempDir::new().unwrap();
        let (status, body) = post_predict(
            app(dir.path()),
            r#"{"college_type": "junior", "marks": 80, "category": "A"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Could not load data for junior colleges."}));
    }

    #[tokio::test]
    async fn test_unreadable_data_file_is_server_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("junior_colleges.csv"), "name,cutoff_10th\nX,1\n").unwrap();
        let (status, body) = post_predict(
            app(dir.path()),
            r#"{"college_type": "junior", "marks": 80, "category": "A"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Could not load data for junior colleges."}));
    }

    #[tokio::test]
    async fn test_short_row_is_served_with_zero_cutoff() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("junior_colleges.csv"),
            "college_name,category,cutoff_10th\nFergusson,OPEN,90\nWadia,OPEN\n",
        )
        .unwrap();
        let (status, body) = post_predict(
            app(dir.path()),
            r#"{"college_type": "junior", "marks": 50, "category": "open"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([{"college_name": "Wadia", "category": "OPEN", "cutoff": 0}]));
    }

    #[tokio::test]
    async fn test_repeated_requests_are_identical() {
        let dir = seeded_dir();
        let request = r#"{"college_type": "junior", "marks": 95, "category": "a"}"#;
        let first = post_predict(app(dir.path()), request).await;
        let second = post_predict(app(dir.path()), request).await;
        assert_eq!(first, second);
        assert_eq!(first.1[0]["college_name"], json!("SP College"));
    }

    #[tokio::test]
    async fn test_index_serves_html() {
        let dir = TempDir::new().unwrap();
        let response = app(dir.path())
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/html"));
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("/predict"));
    }

    #[tokio::test]
    async fn test_health_reports_ok() {
        let dir = TempDir::new().unwrap();
        let response = app(dir.path())
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], json!("ok"));
    }
}
