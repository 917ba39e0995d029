use axum::{extract::State, Extension, Json};
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::auth::middleware::AuthUser;
use crate::error::AppResult;
use crate::services::eligibility;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct NewReportAlert {
    pub report_id: Uuid,
    pub week_label: String,
}

#[derive(Debug, Serialize)]
pub struct AlertsResponse {
    /// Newest unviewed report, if any and not dismissed this session.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_report: Option<NewReportAlert>,
    /// Whether the PHQ-9 re-prompt nudge should show.
    pub phq9_due: bool,
}

/// Reactive alert evaluation: recomputed from the current record lists on
/// every read. Dismissals are session-only; the PHQ-9 one resets whenever
/// any source list changes, so the nudge recurs by design.
pub async fn get_alerts(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<AlertsResponse>> {
    let new_report = if state.store.is_report_alert_dismissed(auth_user.id).await {
        None
    } else {
        state
            .store
            .weekly_reports_for(auth_user.id)
            .await
            .into_iter()
            .find(|r| !r.is_viewed)
            .map(|r| NewReportAlert {
                report_id: r.id,
                week_label: r.week_label,
            })
    };

    let phq9_due = if state.store.is_phq9_alert_dismissed(auth_user.id).await {
        false
    } else {
        let counts = state.store.record_counts(auth_user.id).await;
        let last_survey = state.store.last_phq9_survey_date(auth_user.id).await;
        eligibility::phq9_due(counts, last_survey, Utc::now())
    };

    Ok(Json(AlertsResponse {
        new_report,
        phq9_due,
    }))
}

pub async fn dismiss_phq9_alert(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<serde_json::Value>> {
    state.store.dismiss_phq9_alert(auth_user.id).await;
    Ok(Json(serde_json::json!({ "dismissed": true })))
}

pub async fn dismiss_report_alert(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<serde_json::Value>> {
    state.store.dismiss_report_alert(auth_user.id).await;
    Ok(Json(serde_json::json!({ "dismissed": true })))
}
