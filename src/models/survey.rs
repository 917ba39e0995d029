use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::services::phq9::Severity;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Phq9Survey {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: DateTime<Utc>,
    /// Invariant: equals the sum of `answers`.
    pub score: i32,
    /// Exactly 9 item answers, each 0..=3.
    pub answers: Vec<i32>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitPhq9Request {
    pub answers: Vec<i32>,
}

#[derive(Debug, Serialize)]
pub struct Phq9SurveyResponse {
    #[serde(flatten)]
    pub survey: Phq9Survey,
    pub severity: Severity,
    /// `round(score / 27 * 100)`, for display gauges.
    pub percent: i32,
}

impl From<Phq9Survey> for Phq9SurveyResponse {
    fn from(survey: Phq9Survey) -> Self {
        let severity = Severity::from_score(survey.score);
        let percent = crate::services::phq9::percent(survey.score);
        Self {
            survey,
            severity,
            percent,
        }
    }
}
