//! HTTP surface for the report generators
//!
//! Two public endpoints mirror the archive's member-facing flows: a
//! single-record PDF download and a search-results PDF returned as a data
//! URL for inline display. Render failures never leak internals; the client
//! sees a generic 500 and the details go to the log.

use std::sync::Arc;

use axum::{
    extract::{Json, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::error::RenderError;
use crate::render::logo::fetch_logo;
use crate::render::{RecordReportRenderer, SearchReportRenderer};
use crate::store::ObituaryStore;

/// Shared server state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ObituaryStore>,
    pub logo_url: Option<String>,
}

/// Request payload for the search-results PDF endpoint.
#[derive(Debug, Deserialize)]
pub struct SearchPdfRequest {
    #[serde(rename = "searchQuery")]
    pub search_query: String,
}

/// Search-results PDF as a base64 data URL.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchPdfResponse {
    pub pdf: String,
}

/// Standard error response structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug)]
pub enum AppError {
    /// Reference or query resolved to nothing.
    NotFound(String),
    /// Rendering failed; logged with context, surfaced generically.
    Render(RenderError),
}

impl From<RenderError> for AppError {
    fn from(err: RenderError) -> Self {
        AppError::Render(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse { error: message }),
            )
                .into_response(),
            AppError::Render(err) => {
                log::error!("Report rendering failed: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: "internal server error".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

/// Build the application router with all routes configured.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/generate-pdf/{reference}", get(generate_pdf))
        .route("/api/generate-search-pdf", post(generate_search_pdf))
        .route("/api/health", get(health_check))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Single-record PDF download.
async fn generate_pdf(
    State(state): State<AppState>,
    Path(reference): Path<String>,
) -> Result<Response, AppError> {
    let record = state.store.find_by_reference(&reference).ok_or_else(|| {
        AppError::NotFound(format!("No obituary found for reference {reference}"))
    })?;

    let logo = match state.logo_url.as_deref() {
        Some(url) => fetch_logo(url).await,
        None => None,
    };

    let bytes = RecordReportRenderer::new().render(&record, logo.as_deref())?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{reference}.pdf\""),
            ),
        ],
        bytes,
    )
        .into_response())
}

/// Search-results PDF, returned as a base64 data URL.
async fn generate_search_pdf(
    State(state): State<AppState>,
    Json(payload): Json<SearchPdfRequest>,
) -> Result<Response, AppError> {
    let hits = state.store.search(&payload.search_query);
    if hits.is_empty() {
        return Err(AppError::NotFound(format!(
            "No obituaries match \"{}\"",
            payload.search_query
        )));
    }

    let logo = match state.logo_url.as_deref() {
        Some(url) => fetch_logo(url).await,
        None => None,
    };

    let bytes = SearchReportRenderer::new().render(&hits, &payload.search_query, logo.as_deref())?;

    let response = SearchPdfResponse {
        pdf: format!("data:application/pdf;base64,{}", STANDARD.encode(&bytes)),
    };
    Ok((StatusCode::OK, Json(response)).into_response())
}

/// Health check endpoint for monitoring.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "obit-report",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
