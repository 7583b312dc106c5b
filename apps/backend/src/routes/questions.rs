//! Question curation endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use study_core::{IdGenerator, RandomIds};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// GET /api/questions
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<QuestionQuery>,
) -> Result<Json<QuestionListResponse>> {
    let filter = QuestionFilter::parse(&query)?;

    let questions = match query.module.as_deref().filter(|m| !m.is_empty()) {
        Some(module_id) => state.store.load_questions(module_id).await?,
        None => state.store.load_all_questions().await?,
    };
    let questions: Vec<Question> = questions
        .into_iter()
        .filter(|q| filter.matches(q))
        .collect();

    Ok(Json(QuestionListResponse {
        total: questions.len(),
        questions,
    }))
}

/// POST /api/questions
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewQuestion>,
) -> Result<(StatusCode, Json<Question>)> {
    if payload.module_id.trim().is_empty() {
        return Err(ApiError::BadRequest("module_id is required".to_string()));
    }
    if payload.prompt.trim().is_empty() {
        return Err(ApiError::BadRequest("prompt is required".to_string()));
    }

    let question = payload.into_question(RandomIds.next_id());
    state.store.add_question(question.clone()).await?;
    tracing::info!(module = %question.module_id, id = %question.id, "added manual question");

    Ok((StatusCode::CREATED, Json(question)))
}

/// PUT /api/questions/:module_id/:question_id
pub async fn update(
    State(state): State<AppState>,
    Path((module_id, question_id)): Path<(String, String)>,
    Json(payload): Json<QuestionUpdate>,
) -> Result<Json<Question>> {
    let question = state
        .store
        .update_question(&module_id, &question_id, |q| payload.apply(q))
        .await?;
    Ok(Json(question))
}

/// DELETE /api/questions/:module_id/:question_id
pub async fn delete(
    State(state): State<AppState>,
    Path((module_id, question_id)): Path<(String, String)>,
) -> Result<StatusCode> {
    state
        .store
        .delete_question(&module_id, &question_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
