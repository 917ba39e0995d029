//! Mood sparkline coordinate mapping.
//!
//! Maps chronological mood entries onto a fixed logical canvas. The x axis
//! interpolates by elapsed time, not by entry index, so unevenly spaced
//! entries land proportionally to the real gaps between them; missing days
//! are not synthesized.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::mood::MoodEntry;

pub const DEFAULT_WIDTH: f64 = 100.0;
pub const DEFAULT_HEIGHT: f64 = 120.0;
const MAX_MOOD: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SparklinePoint {
    pub x: f64,
    pub y: f64,
    pub mood: i32,
    pub emoji: String,
    pub date: DateTime<Utc>,
}

/// Plot coordinates for the given entries, in input order. Empty input
/// produces no points; a zero-duration sequence centers every point at
/// `width / 2`.
pub fn map_points(entries: &[MoodEntry], width: f64, height: f64) -> Vec<SparklinePoint> {
    let (Some(first), Some(last)) = (entries.first(), entries.last()) else {
        return Vec::new();
    };

    let first_ms = first.date.timestamp_millis();
    let total_duration = (last.date.timestamp_millis() - first_ms) as f64;

    entries
        .iter()
        .map(|entry| {
            let x = if total_duration > 0.0 {
                ((entry.date.timestamp_millis() - first_ms) as f64 / total_duration) * width
            } else {
                width / 2.0
            };
            // Higher mood sits higher on the canvas (smaller y).
            let y = height - (entry.mood as f64 / MAX_MOOD) * height;
            SparklinePoint {
                x,
                y,
                mood: entry.mood,
                emoji: entry.emoji.clone(),
                date: entry.date,
            }
        })
        .collect()
}
