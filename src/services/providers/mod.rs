//! Episode metadata provider abstraction
//!
//! The pattern engine never talks to the network. Callers fetch show status and
//! season episode lists through an `EpisodeProvider` and hand the normalized
//! episodes to the engine.

use crate::{
    error::AppResult,
    models::{EpisodeMetadata, ShowDetails},
};

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for show metadata providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait EpisodeProvider: Send + Sync {
    /// Fetch show-level details, including lifecycle status
    async fn fetch_show(&self, show_id: u64) -> AppResult<ShowDetails>;

    /// Fetch every episode of one season, normalized to `EpisodeMetadata`
    ///
    /// Episodes without an air date are included; the engine filters them.
    async fn fetch_season_episodes(
        &self,
        show_id: u64,
        season_number: u32,
    ) -> AppResult<Vec<EpisodeMetadata>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
