pub mod models;
pub mod stats;

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

pub use models::{Genre, Season, Series, SeriesSummary, WatchStatus};

use crate::config::library_path;
use crate::error::Result;

/// Persisted watch-list state: the canonical list of tracked series.
/// Stored as a single JSON blob; a missing or malformed blob loads as
/// empty rather than failing.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Library {
    #[serde(default)]
    pub series: Vec<Series>,
}

impl Library {
    pub fn load() -> Result<Self> {
        Self::load_from(&library_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Library::default());
        }

        let content = std::fs::read_to_string(path)?;
        match serde_json::from_str(&content) {
            Ok(library) => Ok(library),
            Err(e) => {
                warn!(error = %e, "Discarding malformed library file");
                Ok(Library::default())
            }
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&library_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn get_series(&self, id: u64) -> Option<&Series> {
        self.series.iter().find(|s| s.id == id)
    }

    pub fn get_series_mut(&mut self, id: u64) -> Option<&mut Series> {
        self.series.iter_mut().find(|s| s.id == id)
    }

    /// Add a series. Rejects an id that is already tracked.
    pub fn add_series(&mut self, series: Series) -> bool {
        if self.get_series(series.id).is_some() {
            return false;
        }
        info!(id = series.id, title = %series.title, "Tracking series");
        self.series.push(series);
        true
    }

    /// Replace the series with the same id.
    pub fn update_series(&mut self, updated: Series) -> bool {
        match self.get_series_mut(updated.id) {
            Some(existing) => {
                *existing = updated;
                true
            }
            None => false,
        }
    }

    pub fn remove_series(&mut self, id: u64) -> bool {
        let before = self.series.len();
        self.series.retain(|s| s.id != id);
        self.series.len() != before
    }

    pub fn set_status(&mut self, id: u64, status: WatchStatus) -> bool {
        match self.get_series_mut(id) {
            Some(series) => {
                series.set_status(status);
                true
            }
            None => false,
        }
    }

    /// Mark an episode as watched
    pub fn mark_watched(&mut self, id: u64, season_number: u32, episode: u32) -> bool {
        self.get_series_mut(id)
            .is_some_and(|s| s.mark_watched(season_number, episode))
    }

    /// Toggle watched state for an episode
    pub fn toggle_watched(&mut self, id: u64, season_number: u32, episode: u32) -> bool {
        let Some(series) = self.get_series_mut(id) else {
            return false;
        };
        let watched = series
            .season(season_number)
            .is_some_and(|s| s.watched_episodes.contains(&episode));
        if watched {
            series.unmark_watched(season_number, episode)
        } else {
            series.mark_watched(season_number, episode)
        }
    }

    /// Flat-model export of the whole list.
    pub fn summaries(&self) -> Vec<SeriesSummary> {
        self.series.iter().map(Series::summary).collect()
    }

    /// Import flat records, skipping ids already tracked.
    pub fn import_summaries(&mut self, summaries: &[SeriesSummary]) -> usize {
        let mut imported = 0;
        for summary in summaries {
            if self.add_series(Series::from_summary(summary)) {
                imported += 1;
            }
        }
        imported
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(id: u64) -> Series {
        let mut series = Series::new(id, format!("series-{id}"));
        series.seasons = vec![Season::new(1, 8)];
        series
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.json");

        let mut library = Library::default();
        library.add_series(sample(1));
        library.mark_watched(1, 1, 3);
        library.save_to(&path).unwrap();

        let loaded = Library::load_from(&path).unwrap();
        assert_eq!(loaded.series.len(), 1);
        assert_eq!(loaded.get_series(1).unwrap().watched_count(), 1);
    }

    #[test]
    fn test_missing_and_malformed_blobs_load_empty() {
        let dir = tempfile::tempdir().unwrap();

        let absent = dir.path().join("absent.json");
        assert!(Library::load_from(&absent).unwrap().series.is_empty());

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "[{\"id\": oops").unwrap();
        assert!(Library::load_from(&broken).unwrap().series.is_empty());
    }

    #[test]
    fn test_add_rejects_duplicate_id() {
        let mut library = Library::default();
        assert!(library.add_series(sample(1)));
        assert!(!library.add_series(sample(1)));
        assert_eq!(library.series.len(), 1);
    }

    #[test]
    fn test_update_and_remove() {
        let mut library = Library::default();
        library.add_series(sample(1));

        let mut updated = sample(1);
        updated.title = "renamed".to_string();
        assert!(library.update_series(updated));
        assert_eq!(library.get_series(1).unwrap().title, "renamed");

        assert!(!library.update_series(sample(2)));
        assert!(library.remove_series(1));
        assert!(!library.remove_series(1));
    }

    #[test]
    fn test_toggle_watched() {
        let mut library = Library::default();
        library.add_series(sample(1));

        assert!(library.toggle_watched(1, 1, 4));
        assert_eq!(library.get_series(1).unwrap().watched_count(), 1);
        assert!(library.toggle_watched(1, 1, 4));
        assert_eq!(library.get_series(1).unwrap().watched_count(), 0);
        assert!(!library.toggle_watched(99, 1, 1));
    }

    #[test]
    fn test_flat_import_export() {
        let mut library = Library::default();
        let mut series = sample(1);
        series.user_status = WatchStatus::Watching;
        series.mark_watched(1, 1);
        series.mark_watched(1, 2);
        library.add_series(series);

        let summaries = library.summaries();
        assert_eq!(summaries[0].progress, 2);
        assert_eq!(summaries[0].total_episodes, 8);

        let mut other = Library::default();
        assert_eq!(other.import_summaries(&summaries), 1);
        // importing again is a no-op
        assert_eq!(other.import_summaries(&summaries), 0);
        assert_eq!(other.get_series(1).unwrap().watched_count(), 2);
    }
}
