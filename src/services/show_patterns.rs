use chrono::{DateTime, Utc};
use std::path::Path;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{EpisodeMetadata, PatternAnalysis, ShowPatternReport, ShowStatus},
    services::{
        providers::EpisodeProvider,
        release_pattern::{apply_overrides, AiringContext, ReleasePatternService},
    },
};

/// One show season to analyze
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonRequest {
    pub show_id: u64,
    pub season_number: u32,
}

/// Fetches a season from the provider, detects its release pattern and applies
/// the lifecycle overrides for the show's current status.
///
/// `as_of` decides which episodes count as already aired.
pub async fn analyze_show_season(
    provider: Arc<dyn EpisodeProvider>,
    show_id: u64,
    season_number: u32,
    as_of: DateTime<Utc>,
) -> AppResult<ShowPatternReport> {
    if season_number == 0 {
        return Err(AppError::InvalidInput(
            "Season number must be positive".to_string(),
        ));
    }

    let (show, episodes) = tokio::try_join!(
        provider.fetch_show(show_id),
        provider.fetch_season_episodes(show_id, season_number),
    )?;

    let analysis = ReleasePatternService::new().analyze_episodes(&episodes);
    let context = AiringContext::for_season(show.status, as_of, &episodes);
    let analysis = apply_overrides(analysis, &context);

    tracing::info!(
        show_id,
        season_number,
        provider = provider.name(),
        pattern = %analysis.pattern,
        confidence = analysis.confidence,
        total_episodes = analysis.total_episodes,
        "Release pattern analyzed"
    );

    Ok(ShowPatternReport {
        show_id,
        show_name: show.name,
        season_number,
        status: show.status,
        analysis,
    })
}

/// Analyzes many show seasons in parallel
///
/// Individual failures are logged and skipped; the call fails only when every
/// request failed.
pub async fn analyze_shows_batch(
    provider: Arc<dyn EpisodeProvider>,
    requests: Vec<SeasonRequest>,
    as_of: DateTime<Utc>,
) -> AppResult<Vec<ShowPatternReport>> {
    tracing::info!(season_count = requests.len(), "Analyzing release pattern batch");

    let mut tasks = Vec::new();

    for request in requests {
        let provider = provider.clone();
        let task = tokio::spawn(async move {
            analyze_show_season(provider, request.show_id, request.season_number, as_of).await
        });
        tasks.push((request, task));
    }

    let mut results = Vec::new();
    let mut errors = Vec::new();

    for (request, task) in tasks {
        match task.await {
            Ok(Ok(report)) => results.push(report),
            Ok(Err(e)) => {
                tracing::error!(
                    show_id = request.show_id,
                    season_number = request.season_number,
                    error = %e,
                    "Release pattern analysis failed"
                );
                errors.push(e);
            }
            Err(e) => {
                tracing::error!(error = %e, "Task join error");
                errors.push(AppError::Internal(e.to_string()));
            }
        }
    }

    if !errors.is_empty() {
        tracing::warn!(
            success_count = results.len(),
            error_count = errors.len(),
            "Partial release pattern batch failure"
        );
    }

    if results.is_empty() && !errors.is_empty() {
        return Err(AppError::ExternalApi(
            "Failed to analyze any of the requested seasons".to_string(),
        ));
    }

    Ok(results)
}

/// Analyzes a JSON array of episodes stored on disk
///
/// Lifecycle overrides are applied only when the show status is known.
pub fn analyze_episode_file(
    path: &Path,
    status: Option<ShowStatus>,
    as_of: DateTime<Utc>,
) -> AppResult<PatternAnalysis> {
    let raw = std::fs::read_to_string(path)?;
    let episodes: Vec<EpisodeMetadata> = serde_json::from_str(&raw)?;

    tracing::info!(
        path = %path.display(),
        episodes = episodes.len(),
        "Loaded episodes from file"
    );

    let analysis = ReleasePatternService::new().analyze_episodes(&episodes);
    Ok(match status {
        Some(status) => {
            apply_overrides(analysis, &AiringContext::for_season(status, as_of, &episodes))
        }
        None => analysis,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PatternLabel, PatternOverride, ShowDetails};
    use crate::services::providers::MockEpisodeProvider;
    use chrono::TimeZone;
    use mockall::predicate::eq;

    fn as_of() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    fn show(id: u64, status: ShowStatus) -> ShowDetails {
        ShowDetails {
            id,
            name: format!("Show {}", id),
            status,
            number_of_seasons: Some(1),
        }
    }

    fn weekly_season(start_day: u32, count: u32) -> Vec<EpisodeMetadata> {
        (0..count)
            .map(|i| {
                let date = Utc.with_ymd_and_hms(2024, 1, start_day, 0, 0, 0).unwrap()
                    + chrono::Duration::days(7 * i as i64);
                EpisodeMetadata::new(
                    format!("e{}", i + 1),
                    1,
                    i + 1,
                    Some(date.format("%Y-%m-%d").to_string()),
                    None,
                )
            })
            .collect()
    }

    fn mock_provider(status: ShowStatus, episodes: Vec<EpisodeMetadata>) -> MockEpisodeProvider {
        let mut provider = MockEpisodeProvider::new();
        provider
            .expect_fetch_show()
            .returning(move |id| Ok(show(id, status)));
        provider
            .expect_fetch_season_episodes()
            .returning(move |_, _| Ok(episodes.clone()));
        provider.expect_name().return_const("mock");
        provider
    }

    #[tokio::test]
    async fn test_returning_weekly_show_keeps_detected_pattern() {
        let provider = mock_provider(ShowStatus::ReturningSeries, weekly_season(1, 8));

        let report = analyze_show_season(Arc::new(provider), 42, 1, as_of())
            .await
            .unwrap();

        assert_eq!(report.show_id, 42);
        assert_eq!(report.show_name, "Show 42");
        assert_eq!(report.status, ShowStatus::ReturningSeries);
        assert_eq!(report.analysis.pattern, PatternLabel::Weekly);
        assert_eq!(report.analysis.override_applied, None);
    }

    #[tokio::test]
    async fn test_ended_show_is_reported_as_binge() {
        let provider = mock_provider(ShowStatus::Ended, weekly_season(1, 8));

        let report = analyze_show_season(Arc::new(provider), 7, 1, as_of())
            .await
            .unwrap();

        assert_eq!(report.analysis.pattern, PatternLabel::Binge);
        assert_eq!(report.analysis.confidence, 0.85);
        assert_eq!(
            report.analysis.override_applied,
            Some(PatternOverride::EndedAndFullyAired)
        );
    }

    #[tokio::test]
    async fn test_ended_show_with_tba_episodes_keeps_detected_pattern() {
        let mut episodes = weekly_season(1, 6);
        episodes.push(EpisodeMetadata::new("e7", 1, 7, None, None));
        let provider = mock_provider(ShowStatus::Ended, episodes);

        let report = analyze_show_season(Arc::new(provider), 8, 1, as_of())
            .await
            .unwrap();

        assert_eq!(report.analysis.pattern, PatternLabel::Weekly);
        assert_eq!(report.analysis.override_applied, None);
    }

    #[tokio::test]
    async fn test_requests_the_given_season() {
        let mut provider = MockEpisodeProvider::new();
        provider
            .expect_fetch_show()
            .with(eq(5))
            .times(1)
            .returning(|id| Ok(show(id, ShowStatus::ReturningSeries)));
        provider
            .expect_fetch_season_episodes()
            .with(eq(5), eq(3))
            .times(1)
            .returning(|_, _| Ok(vec![]));
        provider.expect_name().return_const("mock");

        let report = analyze_show_season(Arc::new(provider), 5, 3, as_of())
            .await
            .unwrap();
        assert_eq!(report.season_number, 3);
        assert_eq!(report.analysis.pattern, PatternLabel::Unknown);
        assert_eq!(report.analysis.confidence, 0.0);
    }

    #[tokio::test]
    async fn test_season_zero_is_rejected() {
        let provider = MockEpisodeProvider::new();
        let result = analyze_show_season(Arc::new(provider), 1, 0, as_of()).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_provider_error_is_propagated() {
        let mut provider = MockEpisodeProvider::new();
        provider
            .expect_fetch_show()
            .returning(|id| Err(AppError::NotFound(format!("show {}", id))));
        provider
            .expect_fetch_season_episodes()
            .returning(|_, _| Ok(vec![]));
        provider.expect_name().return_const("mock");

        let result = analyze_show_season(Arc::new(provider), 404, 1, as_of()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_batch_skips_failed_seasons() {
        let episodes = weekly_season(1, 6);
        let mut provider = MockEpisodeProvider::new();
        provider.expect_fetch_show().returning(|id| {
            if id == 2 {
                Err(AppError::ExternalApi("boom".to_string()))
            } else {
                Ok(show(id, ShowStatus::ReturningSeries))
            }
        });
        provider
            .expect_fetch_season_episodes()
            .returning(move |_, _| Ok(episodes.clone()));
        provider.expect_name().return_const("mock");

        let requests = vec![
            SeasonRequest { show_id: 1, season_number: 1 },
            SeasonRequest { show_id: 2, season_number: 1 },
            SeasonRequest { show_id: 3, season_number: 1 },
        ];

        let reports = analyze_shows_batch(Arc::new(provider), requests, as_of())
            .await
            .unwrap();

        let ids: Vec<u64> = reports.iter().map(|r| r.show_id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_batch_fails_when_everything_fails() {
        let mut provider = MockEpisodeProvider::new();
        provider
            .expect_fetch_show()
            .returning(|_| Err(AppError::ExternalApi("down".to_string())));
        provider
            .expect_fetch_season_episodes()
            .returning(|_, _| Err(AppError::ExternalApi("down".to_string())));
        provider.expect_name().return_const("mock");

        let requests = vec![SeasonRequest { show_id: 1, season_number: 1 }];
        let result = analyze_shows_batch(Arc::new(provider), requests, as_of()).await;
        assert!(matches!(result, Err(AppError::ExternalApi(_))));
    }

    fn write_temp_file(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("tally-patterns-{}-{}", std::process::id(), name));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_analyze_episode_file_with_status() {
        let episodes = weekly_season(1, 5);
        let path = write_temp_file("weekly.json", &serde_json::to_string(&episodes).unwrap());

        let plain = analyze_episode_file(&path, None, as_of()).unwrap();
        assert_eq!(plain.pattern, PatternLabel::Weekly);

        let ended = analyze_episode_file(&path, Some(ShowStatus::Ended), as_of()).unwrap();
        assert_eq!(ended.pattern, PatternLabel::Binge);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_analyze_episode_file_errors() {
        let missing = std::env::temp_dir().join("tally-patterns-does-not-exist.json");
        assert!(matches!(
            analyze_episode_file(&missing, None, as_of()),
            Err(AppError::Io(_))
        ));

        let path = write_temp_file("broken.json", "{ not json");
        assert!(matches!(
            analyze_episode_file(&path, None, as_of()),
            Err(AppError::Json(_))
        ));
        std::fs::remove_file(&path).ok();
    }
}
