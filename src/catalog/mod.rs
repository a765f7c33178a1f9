use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::library::models::Genre;

pub mod cache;
pub mod tmdb;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogSeries {
    pub id: u64,
    pub title: String,
    pub original_title: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub overview: Option<String>,
    pub first_air_date: Option<String>,
    pub vote_average: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogSeason {
    pub season_number: u32,
    pub name: Option<String>,
    pub episode_count: u32,
    pub air_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesDetails {
    pub id: u64,
    pub title: String,
    pub original_title: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub overview: Option<String>,
    pub first_air_date: Option<String>,
    /// Airing status as reported by the catalog ("Returning Series", ...)
    pub status: Option<String>,
    pub vote_average: Option<f64>,
    pub genres: Vec<Genre>,
    pub seasons: Vec<CatalogSeason>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogEpisode {
    pub episode_number: u32,
    pub name: Option<String>,
    pub overview: Option<String>,
    pub air_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeasonDetails {
    pub season_number: u32,
    pub name: Option<String>,
    pub overview: Option<String>,
    pub episodes: Vec<CatalogEpisode>,
}

/// The external catalog service, as the rest of the crate sees it.
#[async_trait::async_trait]
pub trait CatalogProvider {
    async fn search(&self, query: &str) -> Result<Vec<CatalogSeries>>;
    async fn details(&self, id: u64) -> Result<SeriesDetails>;
    async fn season(&self, id: u64, season_number: u32) -> Result<SeasonDetails>;
    async fn recommendations(&self, id: u64) -> Result<Vec<CatalogSeries>>;
    async fn similar(&self, id: u64) -> Result<Vec<CatalogSeries>>;
    async fn trending(&self) -> Result<Vec<CatalogSeries>>;
}
