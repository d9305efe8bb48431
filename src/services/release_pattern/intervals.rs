use chrono::{DateTime, Utc};

use crate::models::EpisodeMetadata;

/// Episodes with usable air dates, sorted, and the day gaps between them
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedIntervals {
    pub sorted: Vec<EpisodeMetadata>,
    pub intervals: Vec<i64>,
}

/// Sorts episodes by air date and computes the gap in calendar days (UTC)
/// between each chronologically adjacent pair.
///
/// Episodes without a parseable air date are dropped. Ties on the air date are
/// ordered by season, episode number and id so the result never depends on
/// input order.
pub fn extract_intervals(episodes: &[EpisodeMetadata]) -> ExtractedIntervals {
    let mut dated: Vec<(DateTime<Utc>, &EpisodeMetadata)> = episodes
        .iter()
        .filter_map(|episode| episode.aired_at().map(|aired| (aired, episode)))
        .collect();

    let dropped = episodes.len() - dated.len();
    if dropped > 0 {
        tracing::debug!(
            dropped,
            kept = dated.len(),
            "Skipping episodes without a usable air date"
        );
    }

    dated.sort_by(|(a_time, a), (b_time, b)| {
        a_time
            .cmp(b_time)
            .then(a.season_number.cmp(&b.season_number))
            .then(a.episode_number.cmp(&b.episode_number))
            .then_with(|| a.id.cmp(&b.id))
    });

    let intervals = dated
        .windows(2)
        .map(|pair| (pair[1].0.date_naive() - pair[0].0.date_naive()).num_days())
        .collect();

    ExtractedIntervals {
        sorted: dated.into_iter().map(|(_, episode)| episode.clone()).collect(),
        intervals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episode(number: u32, air_date: Option<&str>) -> EpisodeMetadata {
        EpisodeMetadata::new(
            format!("ep-{}", number),
            1,
            number,
            air_date.map(str::to_string),
            None,
        )
    }

    #[test]
    fn test_intervals_between_sorted_dates() {
        let episodes = vec![
            episode(1, Some("2024-01-01")),
            episode(2, Some("2024-01-08")),
            episode(3, Some("2024-01-10")),
        ];

        let extracted = extract_intervals(&episodes);
        assert_eq!(extracted.intervals, vec![7, 2]);
        assert_eq!(extracted.sorted.len(), 3);
    }

    #[test]
    fn test_sorts_by_air_date_not_episode_number() {
        let episodes = vec![
            episode(3, Some("2024-01-15")),
            episode(1, Some("2024-01-01")),
            episode(2, Some("2024-01-08")),
        ];

        let extracted = extract_intervals(&episodes);
        let order: Vec<u32> = extracted.sorted.iter().map(|e| e.episode_number).collect();
        assert_eq!(order, vec![1, 2, 3]);
        assert_eq!(extracted.intervals, vec![7, 7]);
    }

    #[test]
    fn test_filters_missing_and_malformed_dates() {
        let episodes = vec![
            episode(1, Some("2024-01-01")),
            episode(2, None),
            episode(3, Some("not a date")),
            episode(4, Some("2024-01-08")),
        ];

        let extracted = extract_intervals(&episodes);
        assert_eq!(extracted.sorted.len(), 2);
        assert_eq!(extracted.intervals, vec![7]);
    }

    #[test]
    fn test_degenerate_inputs_have_no_intervals() {
        assert!(extract_intervals(&[]).intervals.is_empty());

        let single = vec![episode(1, Some("2024-01-01"))];
        let extracted = extract_intervals(&single);
        assert_eq!(extracted.sorted.len(), 1);
        assert!(extracted.intervals.is_empty());
    }

    #[test]
    fn test_same_day_timestamps_are_zero_days_apart() {
        let episodes = vec![
            episode(1, Some("2024-01-01T08:00:00Z")),
            episode(2, Some("2024-01-01T21:00:00Z")),
        ];
        assert_eq!(extract_intervals(&episodes).intervals, vec![0]);
    }

    #[test]
    fn test_weekly_slot_across_dst_change_stays_seven_days() {
        // US daylight saving starts on 2024-03-10
        let episodes = vec![
            episode(1, Some("2024-03-04T21:00:00-05:00")),
            episode(2, Some("2024-03-11T21:00:00-04:00")),
            episode(3, Some("2024-03-18T21:00:00-04:00")),
        ];
        assert_eq!(extract_intervals(&episodes).intervals, vec![7, 7]);
    }

    #[test]
    fn test_gap_counts_calendar_days_not_elapsed_hours() {
        let episodes = vec![
            episode(1, Some("2024-01-01T23:00:00Z")),
            episode(2, Some("2024-01-02T01:00:00Z")),
        ];
        assert_eq!(extract_intervals(&episodes).intervals, vec![1]);
    }

    #[test]
    fn test_ties_ordered_by_episode_number() {
        let episodes = vec![
            episode(2, Some("2024-01-01")),
            episode(1, Some("2024-01-01")),
        ];
        let extracted = extract_intervals(&episodes);
        assert_eq!(extracted.sorted[0].episode_number, 1);
        assert_eq!(extracted.sorted[1].episode_number, 2);
    }
}
