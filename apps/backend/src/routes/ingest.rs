//! Ingestion endpoints

use axum::{extract::State, Json};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::services::ingest;
use crate::AppState;

/// POST /api/ingest
pub async fn import(
    State(state): State<AppState>,
    Json(payload): Json<IngestRequest>,
) -> Result<Json<IngestResponse>> {
    if payload.content.trim().is_empty() {
        return Err(ApiError::BadRequest("No content provided".to_string()));
    }

    let (module, questions) = ingest::preview_import(&payload.content, payload.title());

    let saved = payload.action == IngestAction::Save;
    if saved {
        state.store.save_module(&module).await?;
        state.store.save_questions(&module.id, &questions).await?;
        tracing::info!(
            module = %module.id,
            sections = module.sections.len(),
            questions = questions.len(),
            "saved imported module"
        );
    }

    Ok(Json(IngestResponse {
        module,
        questions,
        saved,
    }))
}

/// POST /api/ingest/all
pub async fn ingest_all(State(state): State<AppState>) -> Result<Json<IngestReport>> {
    let report = ingest::ingest_directory(&state.config.modules_dir, &state.store).await?;
    Ok(Json(report))
}
