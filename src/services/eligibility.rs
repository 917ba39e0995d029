//! Feature gating over cumulative record counts.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

pub const REQUIRED_MOOD_ENTRIES: usize = 7;
pub const REQUIRED_CBT_RECORDS: usize = 7;
/// Re-prompt once strictly more than this many days have passed since the
/// last survey.
pub const PHQ9_REPROMPT_DAYS: i64 = 14;

/// Lifetime record counts for one user. These never reset; the report gate
/// is cumulative, not per-period.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct RecordCounts {
    pub mood_entries: usize,
    pub thought_records: usize,
    pub behavior_records: usize,
}

impl RecordCounts {
    /// Thought and behavior records count toward one combined CBT total.
    pub fn cbt_records(&self) -> usize {
        self.thought_records + self.behavior_records
    }
}

/// The report tab unlocks at 7 mood entries and 7 CBT records (inclusive).
pub fn report_unlocked(counts: RecordCounts) -> bool {
    counts.mood_entries >= REQUIRED_MOOD_ENTRIES && counts.cbt_records() >= REQUIRED_CBT_RECORDS
}

/// Whether the PHQ-9 re-prompt is due: record counts meet the unlock gate
/// and the most recent survey is older than [`PHQ9_REPROMPT_DAYS`] days
/// (no survey at all counts as infinitely old).
pub fn phq9_due(
    counts: RecordCounts,
    last_survey: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> bool {
    if !report_unlocked(counts) {
        return false;
    }
    match last_survey {
        None => true,
        Some(date) => now - date > Duration::days(PHQ9_REPROMPT_DAYS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(mood: usize, thoughts: usize, behaviors: usize) -> RecordCounts {
        RecordCounts {
            mood_entries: mood,
            thought_records: thoughts,
            behavior_records: behaviors,
        }
    }

    #[test]
    fn unlock_boundary_is_inclusive_at_seven() {
        // 6 mood entries and 8 CBT records: still locked.
        assert!(!report_unlocked(counts(6, 5, 3)));
        // 7 and 7: unlocked.
        assert!(report_unlocked(counts(7, 4, 3)));
        // Mood alone is not enough.
        assert!(!report_unlocked(counts(10, 3, 3)));
    }

    #[test]
    fn reprompt_boundary_is_exclusive_at_fourteen_days() {
        let now = Utc::now();
        let eligible = counts(7, 4, 3);

        assert!(phq9_due(eligible, Some(now - Duration::days(15)), now));
        assert!(!phq9_due(eligible, Some(now - Duration::days(14)), now));
        // Just past fourteen days counts.
        assert!(phq9_due(
            eligible,
            Some(now - Duration::days(14) - Duration::seconds(1)),
            now
        ));
    }

    #[test]
    fn no_survey_counts_as_infinitely_old() {
        let now = Utc::now();
        assert!(phq9_due(counts(7, 7, 0), None, now));
        // But the record-count gate still applies.
        assert!(!phq9_due(counts(6, 7, 0), None, now));
    }
}
