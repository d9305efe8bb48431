//! Lifecycle policy applied on top of the raw classification.
//!
//! Kept apart from the classifier so the engine stays a pure function of the
//! episode list. The clock is passed in through [`AiringContext`].

use chrono::{DateTime, Utc};

use crate::models::{EpisodeMetadata, PatternAnalysis, PatternLabel, PatternOverride, ShowStatus};

pub const ENDED_BINGE_CONFIDENCE: f64 = 0.85;
pub const AIRING_WEEKLY_CONFIDENCE: f64 = 0.7;
pub const COMPLETED_SEASON_BINGE_CONFIDENCE: f64 = 0.6;

/// Show-level facts the policy needs besides the episode list
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiringContext {
    pub status: ShowStatus,
    pub as_of: DateTime<Utc>,
    /// Announced episodes without a usable air date; the engine never sees them
    pub undated_episodes: usize,
}

impl AiringContext {
    pub fn new(status: ShowStatus, as_of: DateTime<Utc>) -> Self {
        Self {
            status,
            as_of,
            undated_episodes: 0,
        }
    }

    /// Context for a season, counting its episodes that have no air date yet
    pub fn for_season(
        status: ShowStatus,
        as_of: DateTime<Utc>,
        episodes: &[EpisodeMetadata],
    ) -> Self {
        Self {
            undated_episodes: episodes
                .iter()
                .filter(|episode| episode.aired_at().is_none())
                .count(),
            ..Self::new(status, as_of)
        }
    }
}

/// Applies the first matching override (ended show, currently airing,
/// completed season) and returns the adjusted analysis.
pub fn apply_overrides(analysis: PatternAnalysis, context: &AiringContext) -> PatternAnalysis {
    match select_override(&analysis, context) {
        Some((kind, pattern, confidence)) => {
            tracing::info!(
                override_kind = %kind,
                original_pattern = %analysis.pattern,
                pattern = %pattern,
                status = %context.status,
                "Release pattern overridden"
            );
            with_override(analysis, kind, pattern, confidence)
        }
        None => analysis,
    }
}

fn select_override(
    analysis: &PatternAnalysis,
    context: &AiringContext,
) -> Option<(PatternOverride, PatternLabel, f64)> {
    let episodes = &analysis.diagnostics.episode_details;
    let has_future_episode = episodes
        .iter()
        .filter_map(|episode| episode.aired_at())
        .any(|aired| aired > context.as_of);
    let has_episodes = analysis.total_episodes > 0;
    let is_unknown = analysis.pattern == PatternLabel::Unknown;
    let fully_aired = !has_future_episode && context.undated_episodes == 0;

    if context.status.is_finished() && has_episodes && fully_aired {
        return Some((
            PatternOverride::EndedAndFullyAired,
            PatternLabel::Binge,
            ENDED_BINGE_CONFIDENCE,
        ));
    }

    let currently_airing = has_future_episode || context.status == ShowStatus::ReturningSeries;
    if currently_airing && is_unknown && analysis.total_episodes >= 2 {
        return Some((
            PatternOverride::CurrentlyAiring,
            PatternLabel::Weekly,
            AIRING_WEEKLY_CONFIDENCE,
        ));
    }

    if has_episodes && fully_aired && !context.status.is_finished() && is_unknown {
        return Some((
            PatternOverride::CompletedSeason,
            PatternLabel::Binge,
            COMPLETED_SEASON_BINGE_CONFIDENCE,
        ));
    }

    None
}

fn with_override(
    mut analysis: PatternAnalysis,
    kind: PatternOverride,
    pattern: PatternLabel,
    confidence: f64,
) -> PatternAnalysis {
    analysis.diagnostics.reasoning = format!(
        "{} Overridden to {} ({}); detected pattern was {}.",
        analysis.diagnostics.reasoning, pattern, kind, analysis.pattern
    );
    analysis.pattern = pattern;
    analysis.confidence = confidence;
    analysis.override_applied = Some(kind);
    analysis
}
