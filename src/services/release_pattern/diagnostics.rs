use crate::models::{EpisodeMetadata, PatternDiagnostics, PatternLabel};

use super::classifier::{leading_drop_len, Classification};
use super::stats::IntervalStats;

/// Bundles the raw numbers behind a classification with a readable explanation
pub fn build_diagnostics(
    sorted: Vec<EpisodeMetadata>,
    intervals: Vec<i64>,
    stats: IntervalStats,
    classification: &Classification,
) -> PatternDiagnostics {
    let reasoning = explain(&sorted, &intervals, &stats, classification);

    PatternDiagnostics {
        intervals,
        avg_interval: stats.avg,
        std_dev: stats.std_dev,
        reasoning,
        episode_details: sorted,
    }
}

fn explain(
    sorted: &[EpisodeMetadata],
    intervals: &[i64],
    stats: &IntervalStats,
    classification: &Classification,
) -> String {
    if intervals.is_empty() {
        return format!(
            "Insufficient data: {} episode(s) with usable air dates; at least 2 are needed to detect a release pattern.",
            sorted.len()
        );
    }

    let avg = stats.avg;
    let sigma = stats.std_dev;

    let summary = match classification.pattern {
        PatternLabel::Binge => {
            let widest = intervals.iter().copied().max().unwrap_or(0);
            format!(
                "All {} episodes were released within {} day(s) of each other (average gap of {:.1} days, σ={:.1}), indicating a binge release.",
                sorted.len(),
                widest,
                avg,
                sigma
            )
        }
        PatternLabel::PremiereWeekly => {
            let drop = leading_drop_len(intervals);
            let premiere = if drop > 0 {
                format!("A {}-episode premiere drop", drop + 1)
            } else {
                format!("A premiere gap of {} days", intervals[0])
            };
            format!(
                "{} is followed by weekly releases (average gap of {:.1} days overall, σ={:.1}), indicating a premiere then weekly cadence.",
                premiere, avg, sigma
            )
        }
        PatternLabel::Weekly => format!(
            "Average gap of {:.1} days with low variance (σ={:.1}) indicates a weekly release cadence.",
            avg, sigma
        ),
        PatternLabel::MultiEpisodesPerWeek => format!(
            "Average gap of {:.1} days (σ={:.1}) indicates multiple episodes released each week.",
            avg, sigma
        ),
        PatternLabel::MultiWeekly => format!(
            "Average gap of {:.1} days (σ={:.1}) indicates a release every few weeks.",
            avg, sigma
        ),
        PatternLabel::Mixed => format!(
            "Gaps fall into distinct clusters (average gap of {:.1} days, σ={:.1}), indicating a mixed release schedule.",
            avg, sigma
        ),
        PatternLabel::Unknown => format!(
            "No clear release pattern: average gap of {:.1} days with σ={:.1} does not match a known cadence.",
            avg, sigma
        ),
    };

    format!("{} Confidence {:.2}.", summary, classification.confidence)
}
