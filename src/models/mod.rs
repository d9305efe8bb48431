use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub mod show;

pub use show::{ShowDetails, ShowStatus};

/// One aired (or scheduled) episode of a show
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", from = "EpisodeRecord")]
pub struct EpisodeMetadata {
    pub id: String,
    pub season_number: u32,
    pub episode_number: u32,
    /// ISO-8601 timestamp or calendar date; may be in the future
    pub air_date: Option<String>,
    pub title: String,
}

impl EpisodeMetadata {
    pub fn new(
        id: impl Into<String>,
        season_number: u32,
        episode_number: u32,
        air_date: Option<String>,
        title: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            season_number,
            episode_number,
            air_date,
            title: title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| default_episode_title(episode_number)),
        }
    }

    /// Parsed air date, or `None` when missing or malformed
    pub fn aired_at(&self) -> Option<DateTime<Utc>> {
        self.air_date.as_deref().and_then(parse_air_date)
    }
}

fn default_episode_title(episode_number: u32) -> String {
    format!("Episode {}", episode_number)
}

/// Parses an air date in RFC 3339, naive `YYYY-MM-DDTHH:MM:SS` (read as UTC)
/// or plain `YYYY-MM-DD` form (midnight UTC).
pub fn parse_air_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Wire shape accepted when deserializing episodes; title is optional upstream
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EpisodeRecord {
    id: String,
    season_number: u32,
    episode_number: u32,
    #[serde(default)]
    air_date: Option<String>,
    #[serde(default)]
    title: Option<String>,
}

impl From<EpisodeRecord> for EpisodeMetadata {
    fn from(record: EpisodeRecord) -> Self {
        EpisodeMetadata::new(
            record.id,
            record.season_number,
            record.episode_number,
            record.air_date,
            record.title,
        )
    }
}

/// Release cadence of a show
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PatternLabel {
    /// Whole season released at once
    Binge,
    Weekly,
    /// A premiere (single long lead-in or multi-episode drop) followed by weekly episodes
    PremiereWeekly,
    /// Regular cadence every two or so weeks
    MultiWeekly,
    MultiEpisodesPerWeek,
    /// Two or more distinct gap clusters within the same run
    Mixed,
    Unknown,
}

impl PatternLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternLabel::Binge => "binge",
            PatternLabel::Weekly => "weekly",
            PatternLabel::PremiereWeekly => "premiere_weekly",
            PatternLabel::MultiWeekly => "multi_weekly",
            PatternLabel::MultiEpisodesPerWeek => "multi_episodes_per_week",
            PatternLabel::Mixed => "mixed",
            PatternLabel::Unknown => "unknown",
        }
    }
}

impl Display for PatternLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Policy overrides applied by callers on top of the raw classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PatternOverride {
    EndedAndFullyAired,
    CurrentlyAiring,
    CompletedSeason,
}

impl Display for PatternOverride {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PatternOverride::EndedAndFullyAired => "ended and fully aired",
            PatternOverride::CurrentlyAiring => "currently airing",
            PatternOverride::CompletedSeason => "completed season",
        };
        write!(f, "{}", label)
    }
}

/// Raw numbers and explanation behind a classification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatternDiagnostics {
    pub intervals: Vec<i64>,
    pub avg_interval: f64,
    pub std_dev: f64,
    pub reasoning: String,
    /// Episodes that had usable air dates, in air-date order
    pub episode_details: Vec<EpisodeMetadata>,
}

/// Result of one release-pattern analysis
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatternAnalysis {
    pub pattern: PatternLabel,
    pub confidence: f64,
    pub diagnostics: PatternDiagnostics,
    pub total_episodes: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub override_applied: Option<PatternOverride>,
}

/// Final output of the caller flow for one show season
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShowPatternReport {
    pub show_id: u64,
    pub show_name: String,
    pub season_number: u32,
    pub status: ShowStatus,
    pub analysis: PatternAnalysis,
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// API response from GET /tv/{id}
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbShowDetails {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub number_of_seasons: Option<u32>,
}

impl From<TmdbShowDetails> for ShowDetails {
    fn from(show: TmdbShowDetails) -> Self {
        let status = show
            .status
            .as_deref()
            .map(ShowStatus::from)
            .unwrap_or(ShowStatus::Unknown);

        ShowDetails {
            id: show.id,
            name: show.name,
            status,
            number_of_seasons: show.number_of_seasons,
        }
    }
}

/// API response from GET /tv/{id}/season/{season_number}
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbSeasonDetails {
    #[serde(default)]
    pub episodes: Vec<TmdbEpisode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbEpisode {
    pub id: u64,
    pub season_number: u32,
    pub episode_number: u32,
    /// TMDB sends `null` or `""` for unscheduled episodes
    #[serde(default)]
    pub air_date: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl From<TmdbEpisode> for EpisodeMetadata {
    fn from(episode: TmdbEpisode) -> Self {
        let air_date = episode.air_date.filter(|d| !d.trim().is_empty());

        EpisodeMetadata::new(
            episode.id.to_string(),
            episode.season_number,
            episode.episode_number,
            air_date,
            episode.name,
        )
    }
}
