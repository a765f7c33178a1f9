//! Core of a personal TV-series tracker: the tracked-series library and
//! its watch statistics, a daily activity streak, and a TTL-cached client
//! for the TMDB catalog. The presentation layer lives elsewhere and calls
//! into this crate on user actions.

pub mod catalog;
pub mod config;
pub mod error;
pub mod library;
pub mod logging;
pub mod streak;
pub mod tracker;

pub use catalog::cache::CachedCatalog;
pub use catalog::tmdb::TmdbClient;
pub use error::{Error, Result};
pub use library::{Library, Series, SeriesSummary, WatchStatus};
pub use streak::Streak;
pub use tracker::SeriesTracker;
