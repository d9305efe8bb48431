//! TMDB (The Movie Database) provider
//!
//! API Flow:
//! 1. Show details: /tv/{show_id} → name and lifecycle status
//! 2. Season details: /tv/{show_id}/season/{season_number} → episode air dates

use crate::{
    error::{AppError, AppResult},
    models::{EpisodeMetadata, ShowDetails, TmdbSeasonDetails, TmdbShowDetails},
    services::providers::EpisodeProvider,
};
use reqwest::{Client as HttpClient, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbProvider {
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, resource: &str) -> AppResult<T> {
        let url = self.endpoint(path);

        tracing::debug!(url = %url, "Fetching from TMDB");

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(resource.to_string()));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                body = %body,
                resource = %resource,
                "TMDB request failed"
            );
            return Err(AppError::ExternalApi(format!(
                "TMDB returned status {}: {}",
                status, body
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait::async_trait]
impl EpisodeProvider for TmdbProvider {
    async fn fetch_show(&self, show_id: u64) -> AppResult<ShowDetails> {
        let details: TmdbShowDetails = self
            .get_json(&format!("/tv/{}", show_id), &format!("show {}", show_id))
            .await?;
        let show = ShowDetails::from(details);

        tracing::info!(
            show_id,
            status = %show.status,
            provider = self.name(),
            "Show details fetched"
        );

        Ok(show)
    }

    async fn fetch_season_episodes(
        &self,
        show_id: u64,
        season_number: u32,
    ) -> AppResult<Vec<EpisodeMetadata>> {
        let season: TmdbSeasonDetails = self
            .get_json(
                &format!("/tv/{}/season/{}", show_id, season_number),
                &format!("show {} season {}", show_id, season_number),
            )
            .await?;

        let episodes: Vec<EpisodeMetadata> = season
            .episodes
            .into_iter()
            .map(EpisodeMetadata::from)
            .collect();

        tracing::info!(
            show_id,
            season_number,
            episodes = episodes.len(),
            provider = self.name(),
            "Season episodes fetched"
        );

        Ok(episodes)
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
