use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::handlers::simulate_latency;
use crate::models::mood::{
    CreateMoodEntryRequest, MoodEntry, MoodQuery, MoodSummary, MOOD_EMOJIS,
};
use crate::services::sparkline::{self, SparklinePoint};
use crate::AppState;

pub async fn create_mood_entry(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CreateMoodEntryRequest>,
) -> AppResult<Json<MoodEntry>> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    simulate_latency(&state.config).await;

    let emoji = body
        .emoji
        .unwrap_or_else(|| MOOD_EMOJIS[body.mood as usize].to_string());
    let entry = MoodEntry {
        id: Uuid::new_v4(),
        user_id: auth_user.id,
        date: Utc::now(),
        mood: body.mood,
        emoji,
    };
    state.store.add_mood_entry(entry.clone()).await;

    Ok(Json(entry))
}

/// Most recent entries for the requested chart period, chronological.
pub async fn list_mood_entries(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<MoodQuery>,
) -> AppResult<Json<Vec<MoodEntry>>> {
    let period = query.period.unwrap_or_default();
    let entries = state.store.mood_entries_for(auth_user.id).await;
    let skip = entries.len().saturating_sub(period.entry_count());
    Ok(Json(entries.into_iter().skip(skip).collect()))
}

#[derive(Debug, Deserialize)]
pub struct SparklineQuery {
    pub period: Option<crate::models::mood::ChartPeriod>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct SparklineResponse {
    pub width: f64,
    pub height: f64,
    pub points: Vec<SparklinePoint>,
}

pub async fn get_sparkline(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<SparklineQuery>,
) -> AppResult<Json<SparklineResponse>> {
    let width = query.width.unwrap_or(sparkline::DEFAULT_WIDTH);
    let height = query.height.unwrap_or(sparkline::DEFAULT_HEIGHT);
    if width <= 0.0 || height <= 0.0 {
        return Err(AppError::Validation(
            "Canvas dimensions must be positive".into(),
        ));
    }

    let period = query.period.unwrap_or_default();
    let entries = state.store.mood_entries_for(auth_user.id).await;
    let skip = entries.len().saturating_sub(period.entry_count());
    let window: Vec<MoodEntry> = entries.into_iter().skip(skip).collect();

    Ok(Json(SparklineResponse {
        width,
        height,
        points: sparkline::map_points(&window, width, height),
    }))
}

/// Home-screen weekly summary over the last seven days.
pub async fn get_mood_summary(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<MoodSummary>> {
    let week_ago = Utc::now() - Duration::days(7);

    let entries = state.store.mood_entries_for(auth_user.id).await;
    let recent: Vec<&MoodEntry> = entries.iter().filter(|e| e.date >= week_ago).collect();

    let record_days = {
        let mut days: Vec<chrono::NaiveDate> = recent.iter().map(|e| e.date.date_naive()).collect();
        days.sort_unstable();
        days.dedup();
        days.len()
    };

    let average_mood = if recent.is_empty() {
        0.0
    } else {
        recent.iter().map(|e| e.mood as f64).sum::<f64>() / recent.len() as f64
    };

    // Strictly-greater keeps the earliest entry on ties.
    let mut best_entry: Option<&MoodEntry> = None;
    for &entry in &recent {
        if best_entry.map_or(true, |b| entry.mood > b.mood) {
            best_entry = Some(entry);
        }
    }

    let thought_records = state
        .store
        .thought_records_for(auth_user.id)
        .await
        .iter()
        .filter(|r| r.date >= week_ago)
        .count();
    let behavior_records = state
        .store
        .behavior_records_for(auth_user.id)
        .await
        .iter()
        .filter(|r| r.date >= week_ago)
        .count();

    Ok(Json(MoodSummary {
        record_days,
        average_mood,
        best_entry: best_entry.cloned(),
        thought_records,
        behavior_records,
    }))
}
