//! Watch statistics derived from the tracked-series list. Pure functions:
//! no I/O, an empty list is a valid zeroed case.

use std::collections::HashSet;

use serde::Serialize;

use super::models::{Series, WatchStatus};

/// Fallback recommendations shown before anything has been completed.
pub const DEFAULT_RECOMMENDED_GENRES: [&str; 3] =
    ["Drama", "Action & Adventure", "Sci-Fi & Fantasy"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesStats {
    pub total_seasons: u32,
    pub total_episodes: u32,
    pub watched_episodes: u32,
    /// Percentage, 0-100 for well-formed input. Watched counts are not
    /// clamped to the episode count, so this can exceed 100.
    pub progress: u32,
    pub current_season: u32,
    pub current_episode: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct StatusCounts {
    pub watching: u32,
    pub completed: u32,
    pub planning: u32,
    pub dropped: u32,
    pub paused: u32,
}

impl StatusCounts {
    fn tally(&mut self, status: WatchStatus) {
        match status {
            WatchStatus::Watching => self.watching += 1,
            WatchStatus::Completed => self.completed += 1,
            WatchStatus::Planning => self.planning += 1,
            WatchStatus::Dropped => self.dropped += 1,
            WatchStatus::Paused => self.paused += 1,
        }
    }

    pub fn get(&self, status: WatchStatus) -> u32 {
        match status {
            WatchStatus::Watching => self.watching,
            WatchStatus::Completed => self.completed,
            WatchStatus::Planning => self.planning,
            WatchStatus::Dropped => self.dropped,
            WatchStatus::Paused => self.paused,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenreCount {
    pub name: String,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedSeries {
    pub series: Series,
    pub stats: SeriesStats,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalStats {
    pub total_series: u32,
    /// Running total of episodes the user has watched, not the catalog's
    /// episode counts.
    pub total_episodes: u32,
    pub by_status: StatusCounts,
    pub avg_progress: u32,
    pub top_genres: Vec<GenreCount>,
    pub most_watched: Vec<RankedSeries>,
}

pub fn series_stats(series: &Series) -> SeriesStats {
    let total_seasons = series.seasons.len() as u32;
    let total_episodes = series.episode_count();
    let watched_episodes = series.watched_count();

    let progress = if total_episodes > 0 {
        ((watched_episodes as f64 / total_episodes as f64) * 100.0).round() as u32
    } else {
        0
    };

    // First incomplete season is the current one. All complete (or no
    // seasons at all) falls back to season 1 episode 1.
    let mut current_season = 1;
    let mut current_episode = 1;
    for season in &series.seasons {
        if season.watched_count() < season.episode_count {
            current_season = season.season_number;
            current_episode = season.watched_count() + 1;
            break;
        }
    }

    SeriesStats {
        total_seasons,
        total_episodes,
        watched_episodes,
        progress,
        current_season,
        current_episode,
    }
}

pub fn global_stats(series_list: &[Series]) -> GlobalStats {
    let total_series = series_list.len() as u32;
    let total_episodes = series_list.iter().map(Series::watched_count).sum();

    let mut by_status = StatusCounts::default();
    for series in series_list {
        by_status.tally(series.user_status);
    }

    let avg_progress = if series_list.is_empty() {
        0
    } else {
        let sum: f64 = series_list
            .iter()
            .map(|s| series_stats(s).progress as f64)
            .sum();
        (sum / series_list.len() as f64).round() as u32
    };

    let mut top_genres = count_genres(series_list.iter());
    top_genres.truncate(5);

    let mut most_watched: Vec<RankedSeries> = series_list
        .iter()
        .map(|s| RankedSeries {
            stats: series_stats(s),
            series: s.clone(),
        })
        .collect();
    // stable sort: equal counts keep their input order
    most_watched.sort_by(|a, b| b.stats.watched_episodes.cmp(&a.stats.watched_episodes));
    most_watched.truncate(10);

    GlobalStats {
        total_series,
        total_episodes,
        by_status,
        avg_progress,
        top_genres,
        most_watched,
    }
}

/// Top 3 genre names among completed series, or the fixed fallback when
/// nothing has been completed yet.
pub fn recommended_genres(series_list: &[Series]) -> Vec<String> {
    let completed: Vec<&Series> = series_list
        .iter()
        .filter(|s| s.user_status == WatchStatus::Completed)
        .collect();

    if completed.is_empty() {
        return DEFAULT_RECOMMENDED_GENRES
            .iter()
            .map(|g| g.to_string())
            .collect();
    }

    let mut counts = count_genres(completed.into_iter());
    counts.truncate(3);
    counts.into_iter().map(|c| c.name).collect()
}

/// Series to resume: currently watching, most recently touched first.
pub fn continue_watching(series_list: &[Series]) -> Vec<Series> {
    let mut result: Vec<Series> = series_list
        .iter()
        .filter(|s| s.user_status == WatchStatus::Watching && s.last_watched_at.is_some())
        .cloned()
        .collect();
    result.sort_by(|a, b| b.last_watched_at.cmp(&a.last_watched_at));
    result.truncate(6);
    result
}

pub fn completion_rate(series: &Series) -> u32 {
    series_stats(series).progress
}

/// Frequency-count genres, one per distinct genre per series, sorted by
/// count descending. The stable sort keeps first-seen order on ties.
fn count_genres<'a>(series: impl Iterator<Item = &'a Series>) -> Vec<GenreCount> {
    let mut counts: Vec<GenreCount> = Vec::new();
    for s in series {
        let mut seen = HashSet::new();
        for genre in &s.genres {
            if !seen.insert(genre.name.as_str()) {
                continue;
            }
            match counts.iter_mut().find(|c| c.name == genre.name) {
                Some(entry) => entry.count += 1,
                None => counts.push(GenreCount {
                    name: genre.name.clone(),
                    count: 1,
                }),
            }
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}
