//! HTTP handlers.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use log::{debug, info};
use uuid::Uuid;

use crate::server::AppState;
use crate::server::error::ApiError;
use crate::server::models::PredictRequest;
use crate::service::PredictionResult;
use crate::service::prediction::EMPTY_INPUT_MESSAGE;

/// Health check endpoint
pub async fn health() -> &'static str {
    "OK"
}

/// Classify a posting.
pub async fn predict(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictionResult>, ApiError> {
    let request_id = Uuid::new_v4();
    let Json(req) = payload?;

    let text = req.job_description.unwrap_or_default();
    if text.trim().is_empty() {
        debug!("[{request_id}] rejected empty description");
        return Err(ApiError::InvalidRequest(EMPTY_INPUT_MESSAGE.to_string()));
    }

    debug!("[{request_id}] predicting ({} chars)", text.len());
    let result = state.service.predict(&text).await?;

    info!(
        "[{request_id}] prediction={} fake={:.2}% red_flags={} green_flags={} wordcloud={}",
        result.prediction,
        result.probabilities.fake,
        result.red_flags.len(),
        result.green_flags.len(),
        result.wordcloud.is_some()
    );
    Ok(Json(result))
}
