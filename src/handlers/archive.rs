use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::middleware::AuthUser;
use crate::error::AppResult;
use crate::models::behavior::BehaviorRecord;
use crate::models::thought::ThoughtRecord;
use crate::AppState;

/// Closed set of archive date filters; anything else is rejected at
/// deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchiveFilter {
    All,
    Week,
    Month,
}

impl Default for ArchiveFilter {
    fn default() -> Self {
        Self::All
    }
}

impl ArchiveFilter {
    fn cutoff(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            ArchiveFilter::All => None,
            ArchiveFilter::Week => Some(now - Duration::days(7)),
            ArchiveFilter::Month => Some(now - Duration::days(30)),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ArchiveQuery {
    pub filter: Option<ArchiveFilter>,
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ArchiveResponse {
    pub thoughts: Vec<ThoughtRecord>,
    pub behaviors: Vec<BehaviorRecord>,
}

pub async fn get_archive(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<ArchiveQuery>,
) -> AppResult<Json<ArchiveResponse>> {
    let cutoff = query.filter.unwrap_or_default().cutoff(Utc::now());
    let needle = query
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_lowercase);

    let mut thoughts: Vec<ThoughtRecord> = state
        .store
        .thought_records_for(auth_user.id)
        .await
        .into_iter()
        .filter(|r| cutoff.map_or(true, |c| r.date >= c))
        .filter(|r| needle.as_deref().map_or(true, |q| thought_matches(r, q)))
        .collect();
    thoughts.sort_by(|a, b| b.date.cmp(&a.date));

    let mut behaviors: Vec<BehaviorRecord> = state
        .store
        .behavior_records_for(auth_user.id)
        .await
        .into_iter()
        .filter(|r| cutoff.map_or(true, |c| r.date >= c))
        .filter(|r| needle.as_deref().map_or(true, |q| behavior_matches(r, q)))
        .collect();
    behaviors.sort_by(|a, b| b.date.cmp(&a.date));

    Ok(Json(ArchiveResponse { thoughts, behaviors }))
}

fn thought_matches(record: &ThoughtRecord, needle: &str) -> bool {
    record.situation.to_lowercase().contains(needle)
        || record.automatic_thoughts.to_lowercase().contains(needle)
        || record.alternative_thought.to_lowercase().contains(needle)
}

fn behavior_matches(record: &BehaviorRecord, needle: &str) -> bool {
    record
        .activities
        .iter()
        .any(|a| a.activity.to_lowercase().contains(needle))
}
