use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use http_body_util::BodyExt;
use tower::util::ServiceExt;

use obit_report::api::{app, AppState, ErrorResponse, SearchPdfResponse};
use obit_report::store::MemoryStore;

fn test_state() -> AppState {
    let fixtures = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/records.json");
    let store = MemoryStore::load_from_file(&fixtures).expect("Failed to load fixture records");
    AppState {
        store: Arc::new(store),
        logo_url: None,
    }
}

#[tokio::test]
async fn test_health_check_endpoint() {
    let response = app(test_state())
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .method("GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_generate_pdf_returns_attachment() {
    let response = app(test_state())
        .oneshot(
            Request::builder()
                .uri("/api/generate-pdf/ERIC0004")
                .method("GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/pdf"
    );
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("attachment"));
    assert!(disposition.contains("ERIC0004.pdf"));

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert!(body.starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_generate_pdf_unknown_reference_is_404() {
    let response = app(test_state())
        .oneshot(
            Request::builder()
                .uri("/api/generate-pdf/NOPE9999")
                .method("GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert!(error.error.contains("NOPE9999"));
}

#[tokio::test]
async fn test_generate_search_pdf_returns_data_url() {
    let response = app(test_state())
        .oneshot(
            Request::builder()
                .uri("/api/generate-search-pdf")
                .method("POST")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"searchQuery":"smith"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let payload: SearchPdfResponse = serde_json::from_slice(&body).unwrap();
    assert!(payload.pdf.starts_with("data:application/pdf;base64,"));
}

#[tokio::test]
async fn test_generate_search_pdf_no_matches_is_404() {
    let response = app(test_state())
        .oneshot(
            Request::builder()
                .uri("/api/generate-search-pdf")
                .method("POST")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"searchQuery":"zzzznobody"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert!(error.error.contains("zzzznobody"));
}
