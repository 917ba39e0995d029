use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Emotion {
    pub name: String,
    /// 1 (barely felt) to 10 (overwhelming).
    pub intensity: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThoughtRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: DateTime<Utc>,
    pub situation: String,
    pub emotions: Vec<Emotion>,
    pub automatic_thoughts: String,
    pub cognitive_distortions: Vec<String>,
    pub alternative_thought: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternative_distortions: Vec<String>,
    pub shared_to_community: bool,
}

/// Finalized thought record from the wizard. Partial state lives in the
/// draft instead; finalization requires every step filled in.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateThoughtRecordRequest {
    #[validate(length(min = 1, max = 2000, message = "Situation is required"))]
    pub situation: String,

    pub emotions: Vec<Emotion>,

    #[validate(length(min = 1, max = 5000, message = "Automatic thoughts are required"))]
    pub automatic_thoughts: String,

    pub cognitive_distortions: Vec<String>,

    #[validate(length(min = 1, max = 5000, message = "Alternative thought is required"))]
    pub alternative_thought: String,

    #[serde(default)]
    pub alternative_distortions: Vec<String>,

    #[serde(default)]
    pub shared_to_community: bool,
}

impl CreateThoughtRecordRequest {
    /// Cross-field checks the derive macro cannot express.
    pub fn validate_lists(&self) -> Result<(), String> {
        if self.emotions.is_empty() {
            return Err("At least one emotion is required".into());
        }
        for emotion in &self.emotions {
            if emotion.name.trim().is_empty() {
                return Err("Emotion name must not be blank".into());
            }
            if !(1..=10).contains(&emotion.intensity) {
                return Err(format!(
                    "Emotion intensity {} is invalid; must be 1-10",
                    emotion.intensity
                ));
            }
        }
        if self.cognitive_distortions.is_empty() {
            return Err("At least one cognitive distortion is required".into());
        }
        Ok(())
    }
}
