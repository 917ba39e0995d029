use axum::{extract::State, Extension, Json};

use crate::auth::middleware::AuthUser;
use crate::error::AppResult;
use crate::models::draft::RecordDraft;
use crate::AppState;

pub async fn get_draft(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Option<RecordDraft>>> {
    Ok(Json(state.drafts.get(auth_user.id).await))
}

/// Persist the in-progress wizard state. The client debounces; every call
/// here overwrites the previous draft (last-write-wins).
pub async fn save_draft(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(draft): Json<RecordDraft>,
) -> AppResult<Json<RecordDraft>> {
    state.drafts.save(auth_user.id, draft.clone()).await?;
    Ok(Json(draft))
}

pub async fn clear_draft(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<serde_json::Value>> {
    state.drafts.clear(auth_user.id).await?;
    Ok(Json(serde_json::json!({ "cleared": true })))
}
