//! Mood index aggregation.
//!
//! Sums the per-article scores and rescales the sum against its theoretical
//! range `[-2N, 2N]`, so that `0.0` is every article Very Negative and `1.0`
//! is every article Very Positive.

use mmi_core::UnknownLabelPolicy;
use serde::Serialize;

use crate::label::Sentiment;

/// Score reported when nothing could be counted.
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Largest per-article contribution in absolute value.
const MAX_ARTICLE_SCORE: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodState {
    /// At least one article counted toward the index.
    Scored,
    /// The batch was empty.
    NoArticles,
    /// Articles were found but none of them counted.
    NoRecognizedLabels,
}

/// Aggregated mood for one article batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoodIndex {
    /// Normalized index in `[0, 1]`.
    pub score: f64,
    /// Sum of per-article scores.
    pub total: i64,
    /// Articles in the batch.
    pub article_count: usize,
    /// Articles counted in the denominator (`N`).
    pub counted: usize,
    /// Articles whose verdict carried no score.
    pub unscored: usize,
    pub state: MoodState,
}

impl MoodIndex {
    #[must_use]
    pub fn has_data(&self) -> bool {
        self.state == MoodState::Scored
    }
}

/// Fold a batch of verdicts into a [`MoodIndex`].
///
/// Unscored verdicts add `0` to the sum; `policy` decides whether they count
/// toward `N`. When `N` is zero the score is [`NEUTRAL_SCORE`] and the state
/// says why.
pub fn aggregate_mood<'a, I>(sentiments: I, policy: UnknownLabelPolicy) -> MoodIndex
where
    I: IntoIterator<Item = &'a Sentiment>,
{
    let mut total: i64 = 0;
    let mut article_count = 0usize;
    let mut counted = 0usize;
    let mut unscored = 0usize;

    for sentiment in sentiments {
        article_count += 1;
        if let Some(score) = sentiment.score() {
            total += i64::from(score);
            counted += 1;
        } else {
            unscored += 1;
            if policy == UnknownLabelPolicy::CountAsNeutral {
                counted += 1;
            }
        }
    }

    let (score, state) = match normalize(total, counted) {
        Some(normalized) => (clamp_score(normalized), MoodState::Scored),
        None if article_count == 0 => (NEUTRAL_SCORE, MoodState::NoArticles),
        None => (NEUTRAL_SCORE, MoodState::NoRecognizedLabels),
    };

    MoodIndex {
        score,
        total,
        article_count,
        counted,
        unscored,
        state,
    }
}

/// `(total - min) / (max - min)` with `max = 2n`, `min = -2n`.
///
/// Returns `None` for `n == 0`, where the range is empty.
#[must_use]
pub fn normalize(total: i64, n: usize) -> Option<f64> {
    if n == 0 {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let (total, n) = (total as f64, n as f64);
    let max_possible = n * MAX_ARTICLE_SCORE;
    let min_possible = -max_possible;
    Some((total - min_possible) / (max_possible - min_possible))
}

/// Clamp to `[0, 1]`; non-finite input maps to [`NEUTRAL_SCORE`].
#[must_use]
pub fn clamp_score(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        NEUTRAL_SCORE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::label::Sentiment::{Negative, Neutral, Positive, VeryNegative, VeryPositive};

    fn score(labels: &[Sentiment]) -> f64 {
        aggregate_mood(labels, UnknownLabelPolicy::Exclude).score
    }

    #[test]
    fn all_very_positive_is_one() {
        assert_eq!(score(&[VeryPositive, VeryPositive, VeryPositive]), 1.0);
    }

    #[test]
    fn all_very_negative_is_zero() {
        assert_eq!(score(&[VeryNegative, VeryNegative]), 0.0);
    }

    #[test]
    fn all_neutral_is_half() {
        assert_eq!(score(&[Neutral, Neutral, Neutral, Neutral]), 0.5);
    }

    #[test]
    fn empty_batch_is_neutral_with_no_articles_state() {
        let empty: [Sentiment; 0] = [];
        let mood = aggregate_mood(&empty, UnknownLabelPolicy::Exclude);
        assert_eq!(mood.score, NEUTRAL_SCORE);
        assert_eq!(mood.state, MoodState::NoArticles);
        assert_eq!(mood.counted, 0);
        assert!(!mood.has_data());
    }

    #[test]
    fn mixed_batch_balances_to_half() {
        let mood = aggregate_mood(&[Positive, Negative, Neutral], UnknownLabelPolicy::Exclude);
        assert_eq!(mood.total, 0);
        assert_eq!(mood.counted, 3);
        assert_eq!(mood.score, 0.5);
    }

    #[test]
    fn very_positive_and_positive() {
        let mood = aggregate_mood(&[VeryPositive, Positive], UnknownLabelPolicy::Exclude);
        assert_eq!(mood.total, 3);
        assert_eq!(mood.score, 0.875);
    }

    #[test]
    fn unknown_labels_are_excluded_by_default() {
        let labels = [
            VeryPositive,
            Sentiment::Unknown("Bullish".to_string()),
            Sentiment::Unavailable,
        ];
        let mood = aggregate_mood(&labels, UnknownLabelPolicy::Exclude);
        assert_eq!(mood.article_count, 3);
        assert_eq!(mood.counted, 1);
        assert_eq!(mood.unscored, 2);
        assert_eq!(mood.score, 1.0);
    }

    #[test]
    fn unknown_labels_count_as_neutral_when_asked() {
        let labels = [VeryPositive, Sentiment::Unknown("Bullish".to_string())];
        let mood = aggregate_mood(&labels, UnknownLabelPolicy::CountAsNeutral);
        // total=2, N=2 -> (2+4)/8
        assert_eq!(mood.counted, 2);
        assert_eq!(mood.score, 0.75);
    }

    #[test]
    fn only_unknown_labels_report_no_recognized_labels() {
        let labels = [Sentiment::Unavailable, Sentiment::Unknown("?".to_string())];
        let mood = aggregate_mood(&labels, UnknownLabelPolicy::Exclude);
        assert_eq!(mood.score, NEUTRAL_SCORE);
        assert_eq!(mood.state, MoodState::NoRecognizedLabels);
    }

    #[test]
    fn score_stays_in_unit_interval_for_every_short_sequence() {
        let all = [VeryPositive, Positive, Neutral, Negative, VeryNegative];
        for a in &all {
            for b in &all {
                for c in &all {
                    let s = score(&[a.clone(), b.clone(), c.clone()]);
                    assert!((0.0..=1.0).contains(&s), "{a:?},{b:?},{c:?} -> {s}");
                }
            }
        }
    }

    #[test]
    fn aggregation_is_idempotent() {
        let labels = [Positive, VeryNegative, Sentiment::Unknown("x".to_string())];
        let first = aggregate_mood(&labels, UnknownLabelPolicy::Exclude);
        let second = aggregate_mood(&labels, UnknownLabelPolicy::Exclude);
        assert_eq!(first, second);
    }

    #[test]
    fn clamp_truncates_to_bounds() {
        assert_eq!(clamp_score(1.25), 1.0);
        assert_eq!(clamp_score(-0.1), 0.0);
        assert_eq!(clamp_score(0.3), 0.3);
        assert_eq!(clamp_score(f64::NAN), NEUTRAL_SCORE);
    }

    #[test]
    fn normalize_rejects_empty_range() {
        assert_eq!(normalize(0, 0), None);
        assert_eq!(normalize(-6, 3), Some(0.0));
    }
}
