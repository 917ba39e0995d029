use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Emoji shown for each mood value 0..=10.
pub const MOOD_EMOJIS: [&str; 11] = [
    "😢", "😔", "😕", "😐", "🙂", "😊", "😄", "😁", "🤩", "🥳", "✨",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: DateTime<Utc>,
    pub mood: i32,
    pub emoji: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateMoodEntryRequest {
    #[validate(range(min = 0, max = 10, message = "Mood must be between 0 and 10"))]
    pub mood: i32,

    /// Defaults to the canonical emoji for the mood value.
    pub emoji: Option<String>,
}

/// Closed set of chart ranges accepted by the mood endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartPeriod {
    Daily,
    Weekly,
    Monthly,
}

impl Default for ChartPeriod {
    fn default() -> Self {
        Self::Weekly
    }
}

impl ChartPeriod {
    /// Number of most-recent entries shown for this period.
    pub fn entry_count(self) -> usize {
        match self {
            ChartPeriod::Daily => 7,
            ChartPeriod::Weekly => 14,
            ChartPeriod::Monthly => 30,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MoodQuery {
    pub period: Option<ChartPeriod>,
}

/// Last-7-days summary shown on the home screen.
#[derive(Debug, Serialize)]
pub struct MoodSummary {
    /// Distinct calendar days with at least one mood entry.
    pub record_days: usize,
    pub average_mood: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_entry: Option<MoodEntry>,
    pub thought_records: usize,
    pub behavior_records: usize,
}
