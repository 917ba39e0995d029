use axum::{extract::State, Extension, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::handlers::simulate_latency;
use crate::models::behavior::BehaviorRecord;
use crate::models::mood::MoodEntry;
use crate::models::survey::Phq9Survey;
use crate::models::thought::ThoughtRecord;
use crate::models::user::UserProfile;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ExportResponse {
    pub generated_at: DateTime<Utc>,
    pub user: UserProfile,
    pub mood_entries: Vec<MoodEntry>,
    pub thought_records: Vec<ThoughtRecord>,
    pub behavior_records: Vec<BehaviorRecord>,
    pub phq9_surveys: Vec<Phq9Survey>,
}

/// Settings-page data export. Deterministic bundle of the caller's records,
/// returned after the configured mock delay.
pub async fn export_data(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<ExportResponse>> {
    let user = state
        .store
        .find_user(auth_user.id)
        .await
        .ok_or(AppError::Unauthorized)?;

    simulate_latency(&state.config).await;

    Ok(Json(ExportResponse {
        generated_at: Utc::now(),
        user: user.into(),
        mood_entries: state.store.mood_entries_for(auth_user.id).await,
        thought_records: state.store.thought_records_for(auth_user.id).await,
        behavior_records: state.store.behavior_records_for(auth_user.id).await,
        phq9_surveys: state.store.phq9_surveys_for(auth_user.id).await,
    }))
}
