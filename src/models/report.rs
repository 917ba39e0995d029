use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Point-in-time weekly snapshot produced by the report-generation process.
/// The id lists are by-value copies of record ids, not live references; the
/// referenced records are resolved against the store at view time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyReport {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Display label such as "11월 1주".
    pub week_label: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub phq9_survey_ids: Vec<Uuid>,
    pub thought_record_ids: Vec<Uuid>,
    pub behavior_record_ids: Vec<Uuid>,
    pub mood_entry_count: usize,
    pub is_viewed: bool,
}

#[derive(Debug, Serialize)]
pub struct WeeklyReportSummary {
    pub id: Uuid,
    pub week_label: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub is_viewed: bool,
}

impl From<&WeeklyReport> for WeeklyReportSummary {
    fn from(report: &WeeklyReport) -> Self {
        Self {
            id: report.id,
            week_label: report.week_label.clone(),
            start_date: report.start_date,
            end_date: report.end_date,
            created_at: report.created_at,
            is_viewed: report.is_viewed,
        }
    }
}

/// Progress toward unlocking the report tab, shown while it is still locked.
#[derive(Debug, Serialize)]
pub struct ReportRequirements {
    pub mood_entries: usize,
    pub required_mood_entries: usize,
    pub cbt_records: usize,
    pub required_cbt_records: usize,
}
