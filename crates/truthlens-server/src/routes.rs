//! HTTP routes and handlers

use axum::{
    extract::{DefaultBodyLimit, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

use truthlens_classifiers::Analysis;
use truthlens_core::{Error, NewsId, Vote};
use truthlens_feedback::FeedbackSummary;

use crate::state::AppState;

/// Message returned for blank statements
pub const EMPTY_TEXT: &str = "Please enter some text.";

pub fn create_router(state: AppState) -> Router {
    let max_body_bytes = state.config.server.max_body_bytes;

    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route("/v1/analyze", post(analyze))
        .route("/v1/feedback", post(submit_feedback))
        .route("/v1/feedback/:news_id", get(feedback_summary))
        .fallback(fallback)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

async fn metrics(State(state): State<AppState>) -> String {
    state.metrics_handle.render()
}

#[derive(Debug, Deserialize)]
struct AnalyzeRequest {
    text: String,
}

#[derive(Debug, Serialize)]
struct AnalyzeResponse {
    #[serde(flatten)]
    analysis: Analysis,
    feedback: FeedbackSummary,
}

async fn analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let analysis = state.analyzer.analyze(&req.text).await?;
    info!(
        "Analyzed {} as {} ({}%)",
        analysis.news_id, analysis.label, analysis.score
    );

    let store = state.feedback.clone();
    let news_id = analysis.news_id.clone();
    let feedback = blocking(move || store.summarize(&news_id)).await?;

    Ok(Json(AnalyzeResponse { analysis, feedback }))
}

#[derive(Debug, Deserialize)]
struct FeedbackRequest {
    #[serde(default)]
    news_id: Option<String>,
    #[serde(default)]
    text: Option<String>,
    name: String,
    vote: String,
    #[serde(default)]
    comment: Option<String>,
}

#[derive(Debug, Serialize)]
struct FeedbackResponse {
    news_id: NewsId,
    #[serde(flatten)]
    summary: FeedbackSummary,
}

async fn submit_feedback(
    State(state): State<AppState>,
    Json(req): Json<FeedbackRequest>,
) -> Result<Json<FeedbackResponse>, AppError> {
    let news_id = resolve_news_id(req.news_id.as_deref(), req.text.as_deref())?;
    let vote: Vote = req.vote.parse()?;
    debug!("Feedback {} on {} from {}", vote, news_id, req.name);

    let store = state.feedback.clone();
    let id = news_id.clone();
    let comment = req.comment.unwrap_or_default();
    let summary = blocking(move || store.submit(&id, &req.name, vote, &comment)).await?;

    Ok(Json(FeedbackResponse { news_id, summary }))
}

async fn feedback_summary(
    State(state): State<AppState>,
    Path(news_id): Path<String>,
) -> Result<Json<FeedbackResponse>, AppError> {
    let news_id = NewsId::from_hex(news_id);
    let store = state.feedback.clone();
    let id = news_id.clone();
    let summary = blocking(move || store.summarize(&id)).await?;

    Ok(Json(FeedbackResponse { news_id, summary }))
}

/// Explicit id wins; otherwise the id is derived from the statement itself
fn resolve_news_id(news_id: Option<&str>, text: Option<&str>) -> Result<NewsId, AppError> {
    if let Some(id) = news_id.map(str::trim).filter(|id| !id.is_empty()) {
        return Ok(NewsId::from_hex(id));
    }
    match text {
        Some(text) if !text.trim().is_empty() => Ok(NewsId::from_text(text)),
        _ => Err(AppError::InvalidRequest(
            "Either news_id or text is required".to_string(),
        )),
    }
}

/// Run file I/O off the async workers
async fn blocking<T, F>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> truthlens_core::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?
        .map_err(AppError::from)
}

async fn fallback() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not found")
}

/// Error handling
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0}")]
    InternalError(String),
}

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        match err {
            Error::EmptyInput => AppError::InvalidRequest(EMPTY_TEXT.to_string()),
            Error::InvalidInput(msg) => AppError::InvalidRequest(msg),
            other => AppError::InternalError(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, kind) = match self {
            AppError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, msg, "invalid_request_error")
            }
            AppError::InternalError(msg) => {
                error!("Request failed: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg, "internal_error")
            }
        };

        let body = json!({
            "error": {
                "message": message,
                "type": kind,
            }
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_prefers_explicit_id() {
        let id = resolve_news_id(Some(" abc123 "), Some("ignored")).unwrap();
        assert_eq!(id.as_str(), "abc123");
    }

    #[test]
    fn test_resolve_hashes_text() {
        let id = resolve_news_id(Some(""), Some("Free laptops")).unwrap();
        assert_eq!(id, NewsId::from_text("Free laptops"));
    }

    #[test]
    fn test_resolve_requires_something() {
        assert!(matches!(
            resolve_news_id(None, Some("  ")),
            Err(AppError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_core_error_mapping() {
        assert!(matches!(
            AppError::from(Error::EmptyInput),
            AppError::InvalidRequest(msg) if msg == EMPTY_TEXT
        ));
        assert!(matches!(
            AppError::from(Error::model("boom")),
            AppError::InternalError(_)
        ));
    }
}
