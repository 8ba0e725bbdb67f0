//! Voice input processing handler

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    Json,
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::{AppError, AppState, MAX_BODY_SIZE, MAX_TEXT_CHARS};
use tally_core::{Error, ParsedSpending};

const TEXT_REQUIRED: &str = "Text input is required";

/// Request body for voice processing
#[derive(Debug, Deserialize)]
pub struct VoiceProcessRequest {
    pub text: String,
}

/// POST /api/voice-process - Parse a spoken spending utterance
pub async fn process_voice(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<ParsedSpending>, AppError> {
    let bytes = axum::body::to_bytes(request.into_body(), MAX_BODY_SIZE)
        .await
        .map_err(|_| AppError::payload_too_large("Request body too large"))?;

    let req: VoiceProcessRequest = serde_json::from_slice(&bytes).map_err(|e| {
        warn!(error = %e, "Rejected voice request body");
        AppError::bad_request(TEXT_REQUIRED)
    })?;

    if req.text.trim().is_empty() {
        return Err(AppError::bad_request(TEXT_REQUIRED));
    }

    let chars = req.text.chars().count();
    if chars > MAX_TEXT_CHARS {
        warn!(chars, "Rejected oversized voice text");
        return Err(AppError::bad_request(&format!(
            "Text input must be at most {} characters",
            MAX_TEXT_CHARS
        )));
    }

    let parsed = state.parser.parse(&req.text).map_err(|e| match e {
        Error::InvalidInput(_) => AppError::bad_request(TEXT_REQUIRED),
        other => AppError::internal("Failed to process voice input").with_source(other),
    })?;

    info!(
        amount = parsed.amount,
        currency = %parsed.currency,
        category = %parsed.category,
        confidence = parsed.confidence,
        "Processed voice input"
    );

    Ok(Json(parsed))
}
