use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::models::behavior::{
    BehaviorRecord, CreateBehaviorRecordRequest, PlannedActivity,
};
use crate::models::thought::{CreateThoughtRecordRequest, ThoughtRecord};
use crate::AppState;

/// Finalize a thought record from the wizard. The in-progress draft is
/// cleared once the record is stored.
pub async fn create_thought_record(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CreateThoughtRecordRequest>,
) -> AppResult<Json<ThoughtRecord>> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    body.validate_lists().map_err(AppError::Validation)?;

    let record = ThoughtRecord {
        id: Uuid::new_v4(),
        user_id: auth_user.id,
        date: Utc::now(),
        situation: body.situation,
        emotions: body.emotions,
        automatic_thoughts: body.automatic_thoughts,
        cognitive_distortions: body.cognitive_distortions,
        alternative_thought: body.alternative_thought,
        alternative_distortions: body.alternative_distortions,
        shared_to_community: body.shared_to_community,
    };
    state.store.add_thought_record(record.clone()).await;
    state.drafts.clear(auth_user.id).await?;

    tracing::info!(user_id = %auth_user.id, record_id = %record.id, "Thought record created");

    Ok(Json(record))
}

pub async fn list_thought_records(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Vec<ThoughtRecord>>> {
    let mut records = state.store.thought_records_for(auth_user.id).await;
    records.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(Json(records))
}

pub async fn create_behavior_record(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CreateBehaviorRecordRequest>,
) -> AppResult<Json<BehaviorRecord>> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    body.validate_activities().map_err(AppError::Validation)?;

    let record = BehaviorRecord {
        id: Uuid::new_v4(),
        user_id: auth_user.id,
        date: Utc::now(),
        morning_mood: body.morning_mood,
        work_mood: body.work_mood,
        evening_mood: body.evening_mood,
        activities: body
            .activities
            .into_iter()
            .map(|a| PlannedActivity {
                id: Uuid::new_v4(),
                situation: a.situation,
                activity: a.activity,
                scheduled_date: a.scheduled_date,
                scheduled_time: a.scheduled_time,
                completed: None,
            })
            .collect(),
        completed: body.completed,
    };
    state.store.add_behavior_record(record.clone()).await;
    state.drafts.clear(auth_user.id).await?;

    tracing::info!(user_id = %auth_user.id, record_id = %record.id, "Behavior record created");

    Ok(Json(record))
}

pub async fn list_behavior_records(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Vec<BehaviorRecord>>> {
    let mut records = state.store.behavior_records_for(auth_user.id).await;
    records.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(Json(records))
}

/// Check off a planned activity (idempotent set-true), driven by the
/// home-screen due-activity prompt.
pub async fn check_activity(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path((record_id, activity_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<BehaviorRecord>> {
    let record = state
        .store
        .complete_activity(auth_user.id, record_id, activity_id)
        .await
        .ok_or(AppError::NotFound("Activity not found".into()))?;
    Ok(Json(record))
}
