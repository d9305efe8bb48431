use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Lifecycle status of a show as reported by the metadata provider
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ShowStatus {
    ReturningSeries,
    InProduction,
    Planned,
    Pilot,
    Ended,
    Canceled,
    Unknown,
}

impl ShowStatus {
    /// Whether the show will not produce further episodes
    pub fn is_finished(&self) -> bool {
        matches!(self, ShowStatus::Ended | ShowStatus::Canceled)
    }
}

impl From<&str> for ShowStatus {
    /// Parses TMDB status strings ("Returning Series", "Ended", ...).
    /// Also accepts the snake_case form used in our own output.
    fn from(raw: &str) -> Self {
        let normalized: String = raw
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == ' ' || c == '-' { '_' } else { c })
            .collect();

        match normalized.as_str() {
            "returning_series" | "returning" => ShowStatus::ReturningSeries,
            "in_production" => ShowStatus::InProduction,
            "planned" => ShowStatus::Planned,
            "pilot" => ShowStatus::Pilot,
            "ended" => ShowStatus::Ended,
            "canceled" | "cancelled" => ShowStatus::Canceled,
            _ => ShowStatus::Unknown,
        }
    }
}

impl Display for ShowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ShowStatus::ReturningSeries => "Returning Series",
            ShowStatus::InProduction => "In Production",
            ShowStatus::Planned => "Planned",
            ShowStatus::Pilot => "Pilot",
            ShowStatus::Ended => "Ended",
            ShowStatus::Canceled => "Canceled",
            ShowStatus::Unknown => "Unknown",
        };
        write!(f, "{}", label)
    }
}

/// Show-level metadata needed by the pattern policy layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShowDetails {
    pub id: u64,
    pub name: String,
    pub status: ShowStatus,
    pub number_of_seasons: Option<u32>,
}
