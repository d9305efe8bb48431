//! Release-pattern detection engine
//!
//! Classifies a show's release cadence from its episode air dates:
//! episodes → intervals → statistics → classification → diagnostics.
//! Lifecycle overrides live in [`overrides`] and are applied by callers.

use crate::models::{EpisodeMetadata, PatternAnalysis};

pub mod classifier;
pub mod diagnostics;
pub mod intervals;
pub mod overrides;
pub mod stats;

pub use classifier::{classify, Classification};
pub use diagnostics::build_diagnostics;
pub use intervals::{extract_intervals, ExtractedIntervals};
pub use overrides::{apply_overrides, AiringContext};
pub use stats::{summarize, IntervalStats};

/// Entry point for release-pattern analysis
///
/// The service holds no state: every call is a pure function of its input, so a
/// single instance can be shared across threads or a fresh one created per call.
/// Do not add fields to this type.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReleasePatternService;

impl ReleasePatternService {
    pub fn new() -> Self {
        Self
    }

    /// Analyzes a list of episodes of one show (normally one season)
    pub fn analyze_episodes(&self, episodes: &[EpisodeMetadata]) -> PatternAnalysis {
        let ExtractedIntervals { sorted, intervals } = extract_intervals(episodes);
        let stats = summarize(&intervals);
        let classification = classify(&intervals, &stats, sorted.len());
        let total_episodes = sorted.len();

        PatternAnalysis {
            pattern: classification.pattern,
            confidence: classification.confidence,
            diagnostics: build_diagnostics(sorted, intervals, stats, &classification),
            total_episodes,
            override_applied: None,
        }
    }

    /// Same as [`analyze_episodes`](Self::analyze_episodes), for episodes still in
    /// a provider's native shape (e.g. `TmdbEpisode`)
    pub fn analyze_release_pattern<I, E>(&self, episode_metadata: I) -> PatternAnalysis
    where
        I: IntoIterator<Item = E>,
        E: Into<EpisodeMetadata>,
    {
        let episodes: Vec<EpisodeMetadata> =
            episode_metadata.into_iter().map(Into::into).collect();
        self.analyze_episodes(&episodes)
    }
}

/// Analyzes a list of episodes with a throwaway [`ReleasePatternService`]
pub fn analyze_episodes(episodes: &[EpisodeMetadata]) -> PatternAnalysis {
    ReleasePatternService.analyze_episodes(episodes)
}

pub fn analyze_release_pattern<I, E>(episode_metadata: I) -> PatternAnalysis
where
    I: IntoIterator<Item = E>,
    E: Into<EpisodeMetadata>,
{
    ReleasePatternService.analyze_release_pattern(episode_metadata)
}
