//! Module endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// GET /api/modules
pub async fn list(State(state): State<AppState>) -> Result<Json<ModuleListResponse>> {
    let mut modules = Vec::new();
    for module in state.store.list_modules().await? {
        let question_count = state.store.load_questions(&module.id).await?.len();
        modules.push(ModuleSummary::new(&module, question_count));
    }
    Ok(Json(ModuleListResponse { modules }))
}

/// GET /api/modules/:id
pub async fn get(
    State(state): State<AppState>,
    Path(module_id): Path<String>,
) -> Result<Json<Module>> {
    state
        .store
        .load_module(&module_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Module {}", module_id)))
}
