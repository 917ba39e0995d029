//! Weekly report aggregation.
//!
//! Derives the statistics bundle for one report from the records its id
//! lists reference. Recomputed on every view; never mutates anything —
//! marking a report viewed is a separate store operation.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::behavior::{BehaviorRecord, Situation};
use crate::models::survey::Phq9Survey;
use crate::models::thought::ThoughtRecord;

/// The rendered insight pairs the winning activity against a fixed
/// "negative behavior" label; the actual negative-event text is not
/// captured per situation slot, so the placeholder stands in.
pub const NEGATIVE_EVENT_PLACEHOLDER: &str = "상사 전화 받음";

const TOP_EMOTIONS: usize = 5;
const TOP_DISTORTIONS: usize = 3;

#[derive(Debug, Serialize)]
pub struct ReportStats {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phq9: Option<Phq9Section>,
    pub emotions: Vec<NamedCount>,
    pub distortions: Vec<NamedCount>,
    pub alternative_distortions: Vec<NamedCount>,
    /// Coaching suggestion: the least-practiced alternative thinking style.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub least_used_alternative: Option<NamedCount>,
    pub behavior_insights: Vec<BehaviorInsight>,
}

#[derive(Debug, Serialize)]
pub struct Phq9Section {
    /// Chart points for every referenced survey, ascending by date.
    pub points: Vec<Phq9Point>,
    /// Present only when at least two surveys are referenced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<Phq9Trend>,
}

#[derive(Debug, Serialize)]
pub struct Phq9Point {
    pub date: DateTime<Utc>,
    pub score: i32,
}

#[derive(Debug, Serialize)]
pub struct Phq9Trend {
    pub previous_score: i32,
    pub latest_score: i32,
    pub score_change: i32,
    /// Lower is better on this instrument.
    pub is_improving: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct BehaviorInsight {
    pub situation: Situation,
    pub negative_activity: String,
    pub alternative_activity: String,
    pub before_mood: i32,
    pub after_mood: i32,
    pub improvement: i32,
}

pub fn aggregate(
    surveys: &[Phq9Survey],
    thoughts: &[ThoughtRecord],
    behaviors: &[BehaviorRecord],
) -> ReportStats {
    let alternative_counts = tally(
        thoughts
            .iter()
            .flat_map(|r| r.alternative_distortions.iter())
            .map(String::as_str),
    );
    let least_used_alternative = least_used(&alternative_counts);

    ReportStats {
        phq9: phq9_section(surveys),
        emotions: top_n(
            tally(
                thoughts
                    .iter()
                    .flat_map(|r| r.emotions.iter())
                    .map(|e| e.name.as_str()),
            ),
            TOP_EMOTIONS,
        ),
        distortions: top_n(
            tally(
                thoughts
                    .iter()
                    .flat_map(|r| r.cognitive_distortions.iter())
                    .map(|d| distortion_key(d)),
            ),
            TOP_DISTORTIONS,
        ),
        alternative_distortions: top_n(alternative_counts, TOP_DISTORTIONS),
        least_used_alternative,
        behavior_insights: Situation::ALL
            .into_iter()
            .filter_map(|slot| slot_improvement(behaviors, slot))
            .collect(),
    }
}

fn phq9_section(surveys: &[Phq9Survey]) -> Option<Phq9Section> {
    if surveys.is_empty() {
        return None;
    }
    let mut sorted: Vec<&Phq9Survey> = surveys.iter().collect();
    sorted.sort_by_key(|s| s.date);

    let points = sorted
        .iter()
        .map(|s| Phq9Point {
            date: s.date,
            score: s.score,
        })
        .collect();

    let trend = if sorted.len() >= 2 {
        let latest = sorted[sorted.len() - 1];
        let previous = sorted[sorted.len() - 2];
        let score_change = latest.score - previous.score;
        Some(Phq9Trend {
            previous_score: previous.score,
            latest_score: latest.score,
            score_change,
            is_improving: score_change < 0,
        })
    } else {
        None
    };

    Some(Phq9Section { points, trend })
}

/// Distortions are tallied by the name before the first " - " annotation.
fn distortion_key(distortion: &str) -> &str {
    distortion.splitn(2, " - ").next().unwrap_or(distortion)
}

/// Occurrence counts in first-encountered order, so later stable sorts
/// break ties the way the records were written.
fn tally<'a>(names: impl Iterator<Item = &'a str>) -> Vec<NamedCount> {
    let mut counts: Vec<NamedCount> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    for name in names {
        match index.get(name) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(name, counts.len());
                counts.push(NamedCount {
                    name: name.to_string(),
                    count: 1,
                });
            }
        }
    }
    counts
}

fn top_n(mut counts: Vec<NamedCount>, n: usize) -> Vec<NamedCount> {
    // Stable sort keeps first-encountered order among equal counts.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(n);
    counts
}

fn least_used(counts: &[NamedCount]) -> Option<NamedCount> {
    let mut best: Option<&NamedCount> = None;
    for entry in counts {
        if best.map_or(true, |b| entry.count < b.count) {
            best = Some(entry);
        }
    }
    best.cloned()
}

fn clamp_mood(value: i32) -> i32 {
    value.clamp(0, 10)
}

/// The single record with the largest mood improvement for the slot, among
/// records that planned an activity there. First-encountered wins ties.
fn slot_improvement(records: &[BehaviorRecord], slot: Situation) -> Option<BehaviorInsight> {
    let mut best: Option<BehaviorInsight> = None;
    for record in records {
        let Some(activity) = record.activities.iter().find(|a| a.situation == slot) else {
            continue;
        };
        let (before, after) = match slot {
            Situation::Morning => (record.morning_mood, record.work_mood),
            Situation::Work => (record.work_mood, record.evening_mood),
            // No next-day mood exists for the evening slot; credit a fixed
            // one-point lift instead.
            Situation::Evening => (record.evening_mood, record.evening_mood + 1),
        };
        let before = clamp_mood(before);
        let after = clamp_mood(after);
        let improvement = after - before;
        if best.as_ref().map_or(true, |b| improvement > b.improvement) {
            best = Some(BehaviorInsight {
                situation: slot,
                negative_activity: NEGATIVE_EVENT_PLACEHOLDER.into(),
                alternative_activity: activity.activity.clone(),
                before_mood: before,
                after_mood: after,
                improvement,
            });
        }
    }
    best
}
