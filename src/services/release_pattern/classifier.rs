//! Decision procedure mapping interval statistics to a release pattern.
//!
//! Rules are tried from most to least specific and the first match wins:
//! binge, premiere + weekly, weekly, multiple episodes per week, multi-weekly,
//! mixed, then the low-confidence unknown fallback.

use crate::models::PatternLabel;

use super::stats::{summarize, IntervalStats};

/// Largest gap (days) still counted as part of a simultaneous drop
pub const BINGE_MAX_GAP_DAYS: i64 = 1;

pub const WEEKLY_MIN_AVG_DAYS: f64 = 5.0;
pub const WEEKLY_MAX_AVG_DAYS: f64 = 9.0;
pub const WEEKLY_MAX_CV: f64 = 0.3;

/// First gap must be at least this multiple of the following weekly mean
pub const PREMIERE_GAP_RATIO: f64 = 2.0;
pub const PREMIERE_MIN_FOLLOWING_GAPS: usize = 2;

pub const MULTI_EPISODE_MIN_AVG_DAYS: f64 = 1.0;
pub const MULTI_EPISODE_MAX_AVG_DAYS: f64 = 4.0;
pub const MULTI_EPISODE_MAX_CV: f64 = 0.75;

pub const MULTI_WEEKLY_MIN_AVG_DAYS: f64 = 10.0;
pub const MULTI_WEEKLY_MAX_AVG_DAYS: f64 = 20.0;
pub const MULTI_WEEKLY_MAX_CV: f64 = 0.5;

/// Minimum distance (days) between the two gap clusters of a mixed schedule
pub const MIXED_MIN_SEPARATION_DAYS: i64 = 5;
pub const MIXED_MIN_INTERVALS: usize = 3;
/// Each side of the split needs this many gaps to count as a cluster
pub const MIXED_MIN_CLUSTER_SIZE: usize = 2;

/// Pattern label and heuristic confidence in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub pattern: PatternLabel,
    pub confidence: f64,
}

impl Classification {
    fn new(pattern: PatternLabel, confidence: f64) -> Self {
        Self {
            pattern,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    pub fn insufficient_data() -> Self {
        Self::new(PatternLabel::Unknown, 0.0)
    }
}

/// Classifies the release cadence described by `intervals`
///
/// `stats` must be the summary of `intervals`; `episode_count` is the number of
/// dated episodes the intervals were extracted from.
pub fn classify(intervals: &[i64], stats: &IntervalStats, episode_count: usize) -> Classification {
    if episode_count < 2 || intervals.is_empty() {
        return Classification::insufficient_data();
    }

    let classification = detect_binge(intervals, stats)
        .or_else(|| detect_premiere_weekly(intervals))
        .or_else(|| detect_weekly(stats))
        .or_else(|| detect_multi_episodes_per_week(stats))
        .or_else(|| detect_multi_weekly(stats))
        .or_else(|| detect_mixed(intervals))
        .unwrap_or_else(|| fallback(stats));

    tracing::debug!(
        pattern = %classification.pattern,
        confidence = classification.confidence,
        avg_interval = stats.avg,
        std_dev = stats.std_dev,
        episode_count,
        "Release pattern classified"
    );

    classification
}

/// Linear score that starts at `best` for zero dispersion and drops by `span`
/// as the coefficient of variation reaches `max_cv`
fn dispersion_score(cv: f64, max_cv: f64, best: f64, span: f64) -> f64 {
    best - span * (cv / max_cv).min(1.0)
}

fn in_band(value: f64, min: f64, max: f64) -> bool {
    value >= min && value <= max
}

fn is_weekly_shape(stats: &IntervalStats) -> bool {
    in_band(stats.avg, WEEKLY_MIN_AVG_DAYS, WEEKLY_MAX_AVG_DAYS)
        && stats.coefficient_of_variation() <= WEEKLY_MAX_CV
}

fn detect_binge(intervals: &[i64], stats: &IntervalStats) -> Option<Classification> {
    if !intervals.iter().all(|&gap| gap <= BINGE_MAX_GAP_DAYS) {
        return None;
    }
    Some(Classification::new(
        PatternLabel::Binge,
        0.95 - 0.05 * stats.avg.min(BINGE_MAX_GAP_DAYS as f64),
    ))
}

/// Number of binge-level gaps the season opens with
pub(crate) fn leading_drop_len(intervals: &[i64]) -> usize {
    intervals
        .iter()
        .take_while(|&&gap| gap <= BINGE_MAX_GAP_DAYS)
        .count()
}

/// A premiere is either a long lead-in gap before episode two or a
/// multi-episode drop; in both cases a weekly run must follow.
fn detect_premiere_weekly(intervals: &[i64]) -> Option<Classification> {
    let leading_drop = leading_drop_len(intervals);
    let following = if leading_drop > 0 {
        &intervals[leading_drop..]
    } else {
        &intervals[1..]
    };

    if following.len() < PREMIERE_MIN_FOLLOWING_GAPS {
        return None;
    }

    let following_stats = summarize(following);
    if !is_weekly_shape(&following_stats) {
        return None;
    }

    if leading_drop == 0 && (intervals[0] as f64) < PREMIERE_GAP_RATIO * following_stats.avg {
        return None;
    }

    Some(Classification::new(
        PatternLabel::PremiereWeekly,
        dispersion_score(
            following_stats.coefficient_of_variation(),
            WEEKLY_MAX_CV,
            0.85,
            0.10,
        ),
    ))
}

fn detect_weekly(stats: &IntervalStats) -> Option<Classification> {
    if !is_weekly_shape(stats) {
        return None;
    }
    Some(Classification::new(
        PatternLabel::Weekly,
        dispersion_score(stats.coefficient_of_variation(), WEEKLY_MAX_CV, 0.9, 0.3),
    ))
}

fn detect_multi_episodes_per_week(stats: &IntervalStats) -> Option<Classification> {
    let cv = stats.coefficient_of_variation();
    if !in_band(stats.avg, MULTI_EPISODE_MIN_AVG_DAYS, MULTI_EPISODE_MAX_AVG_DAYS)
        || cv > MULTI_EPISODE_MAX_CV
    {
        return None;
    }
    Some(Classification::new(
        PatternLabel::MultiEpisodesPerWeek,
        dispersion_score(cv, MULTI_EPISODE_MAX_CV, 0.8, 0.2),
    ))
}

fn detect_multi_weekly(stats: &IntervalStats) -> Option<Classification> {
    let cv = stats.coefficient_of_variation();
    if !in_band(stats.avg, MULTI_WEEKLY_MIN_AVG_DAYS, MULTI_WEEKLY_MAX_AVG_DAYS)
        || cv > MULTI_WEEKLY_MAX_CV
    {
        return None;
    }
    Some(Classification::new(
        PatternLabel::MultiWeekly,
        dispersion_score(cv, MULTI_WEEKLY_MAX_CV, 0.75, 0.15),
    ))
}

/// Splits the sorted gaps at their widest jump and accepts the split when the
/// two clusters are far apart compared to their own spread.
fn detect_mixed(intervals: &[i64]) -> Option<Classification> {
    if intervals.len() < MIXED_MIN_INTERVALS {
        return None;
    }

    let mut sorted = intervals.to_vec();
    sorted.sort_unstable();

    let (split, separation) = sorted
        .windows(2)
        .enumerate()
        .map(|(i, pair)| (i + 1, pair[1] - pair[0]))
        .max_by_key(|&(_, jump)| jump)?;

    if separation < MIXED_MIN_SEPARATION_DAYS {
        return None;
    }

    let (low, high) = sorted.split_at(split);
    if low.len() < MIXED_MIN_CLUSTER_SIZE || high.len() < MIXED_MIN_CLUSTER_SIZE {
        return None;
    }

    let low_stats = summarize(low);
    let high_stats = summarize(high);

    let separation = separation as f64;
    if separation <= 2.0 * low_stats.std_dev.max(high_stats.std_dev) {
        return None;
    }

    let n = sorted.len() as f64;
    let pooled_std = ((low.len() as f64 * low_stats.std_dev.powi(2)
        + high.len() as f64 * high_stats.std_dev.powi(2))
        / n)
        .sqrt();
    let quality = (1.0 - pooled_std / separation).clamp(0.0, 1.0);

    Some(Classification::new(PatternLabel::Mixed, 0.5 + 0.2 * quality))
}

fn fallback(stats: &IntervalStats) -> Classification {
    let cv = stats.coefficient_of_variation().min(1.0);
    Classification::new(PatternLabel::Unknown, 0.5 - 0.2 * cv)
}
