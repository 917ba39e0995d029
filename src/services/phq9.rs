//! PHQ-9 scoring.
//!
//! Nine items, each answered 0..=3, summed into a 0..=27 total. Callers
//! validate through [`score`] before persisting a survey.

use serde::{Deserialize, Serialize};

pub const QUESTION_COUNT: usize = 9;
pub const MAX_ANSWER: i32 = 3;
pub const MAX_SCORE: i32 = 27;

/// Sums the answers. Rejects input that is not exactly 9 values in [0,3];
/// nothing is persisted on rejection.
pub fn score(answers: &[i32]) -> Result<i32, String> {
    if answers.len() != QUESTION_COUNT {
        return Err(format!(
            "Expected {} answers, got {}",
            QUESTION_COUNT,
            answers.len()
        ));
    }
    if let Some(bad) = answers.iter().find(|a| !(0..=MAX_ANSWER).contains(*a)) {
        return Err(format!("Answer {} is out of range; must be 0-{}", bad, MAX_ANSWER));
    }
    Ok(answers.iter().sum())
}

/// Normalized percentage for display gauges: `round(score / 27 * 100)`.
pub fn percent(score: i32) -> i32 {
    ((score as f64 / MAX_SCORE as f64) * 100.0).round() as i32
}

/// Standard PHQ-9 severity buckets, used for display imagery and coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Minimal,
    Mild,
    Moderate,
    ModeratelySevere,
    Severe,
}

impl Severity {
    pub fn from_score(score: i32) -> Self {
        match score {
            s if s <= 4 => Severity::Minimal,
            s if s <= 9 => Severity::Mild,
            s if s <= 14 => Severity::Moderate,
            s if s <= 19 => Severity::ModeratelySevere,
            _ => Severity::Severe,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Minimal => "minimal",
            Severity::Mild => "mild",
            Severity::Moderate => "moderate",
            Severity::ModeratelySevere => "moderately severe",
            Severity::Severe => "severe",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_is_sum_of_answers() {
        assert_eq!(score(&[0; 9]), Ok(0));
        assert_eq!(score(&[3; 9]), Ok(27));
        assert_eq!(score(&[2, 2, 2, 1, 2, 2, 1, 2, 1]), Ok(15));
        assert_eq!(score(&[1, 1, 2, 1, 1, 1, 1, 1, 1]), Ok(10));
    }

    #[test]
    fn score_rejects_wrong_length() {
        assert!(score(&[1; 8]).is_err());
        assert!(score(&[1; 10]).is_err());
        assert!(score(&[]).is_err());
    }

    #[test]
    fn score_rejects_out_of_range_answers() {
        assert!(score(&[0, 0, 0, 0, 4, 0, 0, 0, 0]).is_err());
        assert!(score(&[0, 0, 0, 0, -1, 0, 0, 0, 0]).is_err());
    }

    #[test]
    fn severity_bucket_boundaries() {
        assert_eq!(Severity::from_score(0), Severity::Minimal);
        assert_eq!(Severity::from_score(4), Severity::Minimal);
        assert_eq!(Severity::from_score(5), Severity::Mild);
        assert_eq!(Severity::from_score(9), Severity::Mild);
        assert_eq!(Severity::from_score(10), Severity::Moderate);
        assert_eq!(Severity::from_score(14), Severity::Moderate);
        assert_eq!(Severity::from_score(15), Severity::ModeratelySevere);
        assert_eq!(Severity::from_score(19), Severity::ModeratelySevere);
        assert_eq!(Severity::from_score(20), Severity::Severe);
        assert_eq!(Severity::from_score(27), Severity::Severe);
    }

    #[test]
    fn percent_is_rounded() {
        assert_eq!(percent(0), 0);
        assert_eq!(percent(27), 100);
        assert_eq!(percent(10), 37); // 37.03..
        assert_eq!(percent(14), 52); // 51.85..
    }
}
