use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// The producing wizard caps each situation slot at this many activities.
pub const MAX_ACTIVITIES_PER_SLOT: usize = 3;

/// The three daily situation slots a coping activity can be planned for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Situation {
    Morning,
    Work,
    Evening,
}

impl Situation {
    pub const ALL: [Situation; 3] = [Situation::Morning, Situation::Work, Situation::Evening];

    pub fn as_str(&self) -> &'static str {
        match self {
            Situation::Morning => "morning",
            Situation::Work => "work",
            Situation::Evening => "evening",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedActivity {
    pub id: Uuid,
    pub situation: Situation,
    pub activity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<NaiveDate>,
    /// "HH:MM" wall-clock time, as entered in the wizard.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehaviorRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: DateTime<Utc>,
    pub morning_mood: i32,
    pub work_mood: i32,
    pub evening_mood: i32,
    pub activities: Vec<PlannedActivity>,
    pub completed: bool,
}

#[derive(Debug, Deserialize)]
pub struct NewPlannedActivity {
    pub situation: Situation,
    pub activity: String,
    pub scheduled_date: Option<NaiveDate>,
    pub scheduled_time: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateBehaviorRecordRequest {
    #[validate(range(min = 0, max = 10, message = "Morning mood must be between 0 and 10"))]
    pub morning_mood: i32,

    #[validate(range(min = 0, max = 10, message = "Work mood must be between 0 and 10"))]
    pub work_mood: i32,

    #[validate(range(min = 0, max = 10, message = "Evening mood must be between 0 and 10"))]
    pub evening_mood: i32,

    #[serde(default)]
    pub activities: Vec<NewPlannedActivity>,

    #[serde(default)]
    pub completed: bool,
}

impl CreateBehaviorRecordRequest {
    /// Enforces the per-slot activity cap and non-blank activity text.
    pub fn validate_activities(&self) -> Result<(), String> {
        for slot in Situation::ALL {
            let count = self
                .activities
                .iter()
                .filter(|a| a.situation == slot)
                .count();
            if count > MAX_ACTIVITIES_PER_SLOT {
                return Err(format!(
                    "At most {} activities per {} slot",
                    MAX_ACTIVITIES_PER_SLOT,
                    slot.as_str()
                ));
            }
        }
        for activity in &self.activities {
            if activity.activity.trim().is_empty() {
                return Err("Activity description must not be blank".into());
            }
            if let Some(time) = &activity.scheduled_time {
                if chrono::NaiveTime::parse_from_str(time, "%H:%M").is_err() {
                    return Err(format!("Invalid scheduled time '{}'; expected HH:MM", time));
                }
            }
        }
        Ok(())
    }
}
