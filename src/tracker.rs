//! Ties the watch library to the activity streak the way the presentation
//! layer drives them: adds and edits count as streak activity, deletes and
//! reads do not. Loading runs the streak's day-gap check before anything
//! else can record activity, and persists a reset right away.

use std::path::PathBuf;

use chrono::Local;
use tracing::info;

use crate::config;
use crate::error::Result;
use crate::library::{Library, Series, WatchStatus};
use crate::streak::Streak;

pub struct SeriesTracker {
    library: Library,
    streak: Streak,
    library_path: PathBuf,
    streak_path: PathBuf,
}

impl SeriesTracker {
    pub fn load() -> Result<Self> {
        Self::open(config::library_path()?, config::streak_path()?)
    }

    pub fn open(library_path: PathBuf, streak_path: PathBuf) -> Result<Self> {
        let library = Library::load_from(&library_path)?;
        let mut streak = Streak::load_from(&streak_path)?;

        if streak.reconcile(Local::now().date_naive()) {
            info!(longest = streak.longest, "Streak broken, reset to 0");
            streak.save_to(&streak_path)?;
        }

        info!(series = library.series.len(), "Loaded tracker state");

        Ok(Self {
            library,
            streak,
            library_path,
            streak_path,
        })
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn streak(&self) -> &Streak {
        &self.streak
    }

    pub fn add_series(&mut self, series: Series) -> Result<bool> {
        if !self.library.add_series(series) {
            return Ok(false);
        }
        self.library.save_to(&self.library_path)?;
        self.record_activity()?;
        Ok(true)
    }

    pub fn update_series(&mut self, series: Series) -> Result<bool> {
        if !self.library.update_series(series) {
            return Ok(false);
        }
        self.library.save_to(&self.library_path)?;
        self.record_activity()?;
        Ok(true)
    }

    pub fn set_status(&mut self, id: u64, status: WatchStatus) -> Result<bool> {
        if !self.library.set_status(id, status) {
            return Ok(false);
        }
        self.library.save_to(&self.library_path)?;
        self.record_activity()?;
        Ok(true)
    }

    pub fn mark_watched(&mut self, id: u64, season_number: u32, episode: u32) -> Result<bool> {
        if !self.library.mark_watched(id, season_number, episode) {
            return Ok(false);
        }
        self.library.save_to(&self.library_path)?;
        self.record_activity()?;
        Ok(true)
    }

    /// Deleting is not a qualifying activity.
    pub fn remove_series(&mut self, id: u64) -> Result<bool> {
        if !self.library.remove_series(id) {
            return Ok(false);
        }
        self.library.save_to(&self.library_path)?;
        Ok(true)
    }

    fn record_activity(&mut self) -> Result<()> {
        if self.streak.record(Local::now()) {
            self.streak.save_to(&self.streak_path)?;
        }
        Ok(())
    }
}
