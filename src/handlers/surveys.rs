use axum::{extract::State, Extension, Json};
use chrono::Utc;
use uuid::Uuid;

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::models::survey::{Phq9Survey, Phq9SurveyResponse, SubmitPhq9Request};
use crate::services::phq9;
use crate::AppState;

/// Submit a completed PHQ-9 questionnaire. The answers are validated and
/// scored before the survey is appended; invalid input stores nothing.
pub async fn submit_phq9(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<SubmitPhq9Request>,
) -> AppResult<Json<Phq9SurveyResponse>> {
    let score = phq9::score(&body.answers).map_err(AppError::Validation)?;

    let survey = Phq9Survey {
        id: Uuid::new_v4(),
        user_id: auth_user.id,
        date: Utc::now(),
        score,
        answers: body.answers,
    };
    state.store.add_phq9_survey(survey.clone()).await;

    tracing::info!(
        user_id = %auth_user.id,
        score = score,
        severity = phq9::Severity::from_score(score).as_str(),
        "PHQ-9 survey submitted"
    );

    Ok(Json(survey.into()))
}

pub async fn list_phq9_surveys(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Vec<Phq9SurveyResponse>>> {
    let surveys = state.store.phq9_surveys_for(auth_user.id).await;
    Ok(Json(surveys.into_iter().map(Into::into).collect()))
}
