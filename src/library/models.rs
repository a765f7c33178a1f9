use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogSeries, SeriesDetails};
use crate::catalog::tmdb::{self, PosterSize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WatchStatus {
    Watching,
    Completed,
    #[default]
    Planning,
    Dropped,
    Paused,
}

impl WatchStatus {
    pub const ALL: [WatchStatus; 5] = [
        WatchStatus::Watching,
        WatchStatus::Completed,
        WatchStatus::Planning,
        WatchStatus::Dropped,
        WatchStatus::Paused,
    ];

    pub fn as_display(&self) -> &'static str {
        match self {
            WatchStatus::Watching => "Watching",
            WatchStatus::Completed => "Completed",
            WatchStatus::Planning => "Planning",
            WatchStatus::Dropped => "Dropped",
            WatchStatus::Paused => "Paused",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

/// Per-season watch state. Episode numbers in `watched_episodes` are kept
/// as a set: unordered, deduplicated. `watched <= episode_count` is not
/// enforced; the aggregator trusts its caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Season {
    pub season_number: u32,
    pub episode_count: u32,
    #[serde(default)]
    pub watched_episodes: BTreeSet<u32>,
    #[serde(default)]
    pub status: WatchStatus,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Season {
    pub fn new(season_number: u32, episode_count: u32) -> Self {
        Self {
            season_number,
            episode_count,
            watched_episodes: BTreeSet::new(),
            status: WatchStatus::default(),
            completed_at: None,
        }
    }

    pub fn watched_count(&self) -> u32 {
        self.watched_episodes.len() as u32
    }

    pub fn is_complete(&self) -> bool {
        self.watched_count() >= self.episode_count
    }
}

/// A tracked show. This is the canonical (rich) representation; the flat
/// `SeriesSummary` view is derived from it, never stored alongside it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub original_title: String,
    #[serde(default)]
    pub poster_path: String,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub first_air_date: String,
    /// Catalog airing status ("Returning Series", "Ended", ...)
    #[serde(rename = "status", default)]
    pub air_status: Option<String>,
    #[serde(default)]
    pub user_status: WatchStatus,
    #[serde(default)]
    pub seasons: Vec<Season>,
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub notes: Option<String>,
    pub added_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub last_watched_at: Option<DateTime<Utc>>,
}

/// Flat view of a series: running counters instead of per-episode sets.
/// Matches the original client's persisted shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesSummary {
    pub id: u64,
    pub title: String,
    pub image_url: String,
    pub status: WatchStatus,
    pub progress: u32,
    pub total_episodes: u32,
}

impl Series {
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            title: title.into(),
            original_title: String::new(),
            poster_path: String::new(),
            backdrop_path: None,
            overview: String::new(),
            genres: Vec::new(),
            first_air_date: String::new(),
            air_status: None,
            user_status: WatchStatus::default(),
            seasons: Vec::new(),
            rating: None,
            notes: None,
            added_at: now,
            updated_at: now,
            last_watched_at: None,
        }
    }

    /// Build a series from a catalog search result, the way the add dialog
    /// does: no season data yet, status chosen by the user.
    pub fn from_search(result: &CatalogSeries, status: WatchStatus) -> Self {
        let mut series = Series::new(result.id, result.title.clone());
        series.original_title = result.original_title.clone().unwrap_or_default();
        series.poster_path = result.poster_path.clone().unwrap_or_default();
        series.backdrop_path = result.backdrop_path.clone();
        series.overview = result.overview.clone().unwrap_or_default();
        series.first_air_date = result.first_air_date.clone().unwrap_or_default();
        series.user_status = status;
        series
    }

    /// Build a series from full catalog details, seasons included.
    /// Specials (season 0) are skipped; season numbers are positive.
    pub fn from_details(details: &SeriesDetails, status: WatchStatus) -> Self {
        let mut series = Series::new(details.id, details.title.clone());
        series.original_title = details.original_title.clone().unwrap_or_default();
        series.poster_path = details.poster_path.clone().unwrap_or_default();
        series.backdrop_path = details.backdrop_path.clone();
        series.overview = details.overview.clone().unwrap_or_default();
        series.first_air_date = details.first_air_date.clone().unwrap_or_default();
        series.air_status = details.status.clone();
        series.genres = details.genres.clone();
        series.user_status = status;
        series.seasons = details
            .seasons
            .iter()
            .filter(|s| s.season_number > 0)
            .map(|s| Season::new(s.season_number, s.episode_count))
            .collect();
        series
    }

    pub fn season(&self, number: u32) -> Option<&Season> {
        self.seasons.iter().find(|s| s.season_number == number)
    }

    pub fn season_mut(&mut self, number: u32) -> Option<&mut Season> {
        self.seasons.iter_mut().find(|s| s.season_number == number)
    }

    pub fn watched_count(&self) -> u32 {
        self.seasons.iter().map(Season::watched_count).sum()
    }

    pub fn episode_count(&self) -> u32 {
        self.seasons.iter().map(|s| s.episode_count).sum()
    }

    /// Record an episode as watched. Stamps `last_watched_at` and, when the
    /// season fills up, its completion marker.
    pub fn mark_watched(&mut self, season_number: u32, episode: u32) -> bool {
        let Some(season) = self.season_mut(season_number) else {
            return false;
        };
        season.watched_episodes.insert(episode);
        if season.is_complete() && season.completed_at.is_none() {
            season.status = WatchStatus::Completed;
            season.completed_at = Some(Utc::now());
        }
        let now = Utc::now();
        self.last_watched_at = Some(now);
        self.updated_at = now;
        true
    }

    pub fn unmark_watched(&mut self, season_number: u32, episode: u32) -> bool {
        let Some(season) = self.season_mut(season_number) else {
            return false;
        };
        if !season.watched_episodes.remove(&episode) {
            return false;
        }
        if !season.is_complete() {
            season.completed_at = None;
            if season.status == WatchStatus::Completed {
                season.status = WatchStatus::Watching;
            }
        }
        self.updated_at = Utc::now();
        true
    }

    pub fn set_status(&mut self, status: WatchStatus) {
        self.user_status = status;
        self.updated_at = Utc::now();
    }

    /// Reduce to the flat view.
    pub fn summary(&self) -> SeriesSummary {
        SeriesSummary {
            id: self.id,
            title: self.title.clone(),
            image_url: tmdb::poster_url(&self.poster_path, PosterSize::W342),
            status: self.user_status,
            progress: self.watched_count(),
            total_episodes: self.episode_count(),
        }
    }

    /// Rebuild a series from a flat record. Lossy: the running counters
    /// become a single synthetic season with episodes 1..=progress watched.
    pub fn from_summary(summary: &SeriesSummary) -> Self {
        let mut series = Series::new(summary.id, summary.title.clone());
        series.poster_path = summary.image_url.clone();
        series.user_status = summary.status;
        if summary.total_episodes > 0 || summary.progress > 0 {
            let mut season = Season::new(1, summary.total_episodes);
            season.watched_episodes = (1..=summary.progress).collect();
            season.status = summary.status;
            series.seasons.push(season);
        }
        series
    }
}
