pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::matching::handlers::{handle_compliance, handle_match};
use crate::optimization::handlers::handle_optimize;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Match API
        .route("/api/v1/match", post(handle_match))
        .route("/api/v1/compliance", post(handle_compliance))
        // Optimization API
        .route("/api/v1/optimize", post(handle_optimize))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::matching::MatchEngine;
    use crate::models::fixtures::{make_candidate, make_job};
    use crate::optimization::enhancer::UnavailableEnhancer;
    use crate::optimization::Optimizer;

    fn make_state() -> AppState {
        let engine = MatchEngine::default();
        AppState {
            config: Config {
                anthropic_api_key: None,
                enhancement_timeout: Duration::from_secs(30),
                port: 8080,
                rust_log: "info".to_string(),
            },
            engine,
            optimizer: Arc::new(Optimizer::new(engine, Arc::new(UnavailableEnhancer))),
        }
    }

    async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
        let response = build_router(make_state())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
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
    async fn test_health() {
        let response = build_router(make_state())
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["service"], "cvmatch-api");
        assert_eq!(body["enhancement"], false);
    }

    #[tokio::test]
    async fn test_match_route() {
        let (status, body) = post_json(
            "/api/v1/match",
            json!({"candidate": make_candidate(), "job": make_job()}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["job_id"], "job-42");
        assert!(body["overall_score"].as_u64().unwrap() <= 100);
    }

    #[tokio::test]
    async fn test_match_route_rejects_empty_job_id() {
        let mut job = make_job();
        job.id = String::new();
        let (status, body) = post_json(
            "/api/v1/match",
            json!({"candidate": make_candidate(), "job": job}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_optimize_route_round_trip() {
        let (_, match_result) = post_json(
            "/api/v1/match",
            json!({"candidate": make_candidate(), "job": make_job()}),
        )
        .await;
        let (status, body) = post_json(
            "/api/v1/optimize",
            json!({
                "candidate": make_candidate(),
                "job": make_job(),
                "match_result": match_result,
                "level": "COMPREHENSIVE",
                "target_sections": ["SKILLS", "CERTIFICATES"],
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["level"], "COMPREHENSIVE");
        assert_eq!(body["score_estimated"], false);
        assert!(!body["changes"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_compliance_route() {
        let (status, body) = post_json(
            "/api/v1/compliance",
            json!({"candidate": make_candidate(), "job": make_job()}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["score"], 75);
        assert_eq!(body["failed_checks"], json!(["Experience Details"]));
    }
}
