use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::models::report::{ReportRequirements, WeeklyReportSummary};
use crate::services::eligibility::{
    self, REQUIRED_CBT_RECORDS, REQUIRED_MOOD_ENTRIES,
};
use crate::services::report::{self, ReportStats};
use crate::AppState;

/// The report tab either shows the list or, before the unlock gate is met,
/// the progress toward it.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ReportListResponse {
    Locked {
        requirements: ReportRequirements,
    },
    Unlocked {
        reports: Vec<WeeklyReportSummary>,
        has_unviewed: bool,
    },
}

pub async fn list_reports(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<ReportListResponse>> {
    let counts = state.store.record_counts(auth_user.id).await;
    if !eligibility::report_unlocked(counts) {
        return Ok(Json(ReportListResponse::Locked {
            requirements: ReportRequirements {
                mood_entries: counts.mood_entries,
                required_mood_entries: REQUIRED_MOOD_ENTRIES,
                cbt_records: counts.cbt_records(),
                required_cbt_records: REQUIRED_CBT_RECORDS,
            },
        }));
    }

    let reports = state.store.weekly_reports_for(auth_user.id).await;
    let has_unviewed = reports.iter().any(|r| !r.is_viewed);
    Ok(Json(ReportListResponse::Unlocked {
        reports: reports.iter().map(Into::into).collect(),
        has_unviewed,
    }))
}

#[derive(Debug, Serialize)]
pub struct ReportDetailResponse {
    #[serde(flatten)]
    pub report: WeeklyReportSummary,
    pub mood_entry_count: usize,
    pub stats: ReportStats,
}

/// Full statistics bundle for one report, recomputed on every view from the
/// records its id lists reference. Opening the detail also marks the report
/// viewed, mirroring the client behavior.
pub async fn get_report_detail(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(report_id): Path<Uuid>,
) -> AppResult<Json<ReportDetailResponse>> {
    let report = state
        .store
        .weekly_report(auth_user.id, report_id)
        .await
        .ok_or(AppError::NotFound("Report not found".into()))?;

    let surveys = state
        .store
        .phq9_surveys_by_ids(auth_user.id, &report.phq9_survey_ids)
        .await;
    let thoughts = state
        .store
        .thought_records_by_ids(auth_user.id, &report.thought_record_ids)
        .await;
    let behaviors = state
        .store
        .behavior_records_by_ids(auth_user.id, &report.behavior_record_ids)
        .await;

    let stats = report::aggregate(&surveys, &thoughts, &behaviors);

    state.store.mark_report_viewed(auth_user.id, report_id).await;

    Ok(Json(ReportDetailResponse {
        report: (&report).into(),
        mood_entry_count: report.mood_entry_count,
        stats,
    }))
}

/// Explicit idempotent mark-as-viewed, decoupled from aggregation.
pub async fn mark_report_viewed(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(report_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    if !state.store.mark_report_viewed(auth_user.id, report_id).await {
        return Err(AppError::NotFound("Report not found".into()));
    }
    Ok(Json(serde_json::json!({ "is_viewed": true })))
}
