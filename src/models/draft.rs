use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::behavior::Situation;
use crate::models::thought::Emotion;

/// Partial wizard state, persisted under the single draft key. Exactly one
/// draft (of either kind) exists per user; finishing a record clears it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RecordDraft {
    Thought(ThoughtDraft),
    Behavior(BehaviorDraft),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThoughtDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub situation: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub emotions: Vec<Emotion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub automatic_thoughts: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cognitive_distortions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternative_thought: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BehaviorDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub morning_mood: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_mood: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evening_mood: Option<i32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub activities: Vec<DraftActivity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftActivity {
    pub situation: Situation,
    pub activity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_time: Option<String>,
}
