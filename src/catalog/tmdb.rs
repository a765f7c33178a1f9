use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::catalog::{
    CatalogEpisode, CatalogProvider, CatalogSeason, CatalogSeries, SeasonDetails, SeriesDetails,
};
use crate::error::{Error, Result};
use crate::library::models::Genre;

const TMDB_API_BASE: &str = "https://api.themoviedb.org/3";
const TMDB_IMAGE_BASE: &str = "https://image.tmdb.org/t/p";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosterSize {
    W185,
    W342,
    W500,
}

impl PosterSize {
    fn as_path_segment(&self) -> &'static str {
        match self {
            PosterSize::W185 => "w185",
            PosterSize::W342 => "w342",
            PosterSize::W500 => "w500",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackdropSize {
    W780,
    W1280,
    Original,
}

impl BackdropSize {
    fn as_path_segment(&self) -> &'static str {
        match self {
            BackdropSize::W780 => "w780",
            BackdropSize::W1280 => "w1280",
            BackdropSize::Original => "original",
        }
    }
}

/// Full image URL for a catalog poster path. Empty paths stay empty and
/// already-absolute URLs pass through untouched.
pub fn poster_url(path: &str, size: PosterSize) -> String {
    image_url(path, size.as_path_segment())
}

pub fn backdrop_url(path: &str, size: BackdropSize) -> String {
    image_url(path, size.as_path_segment())
}

fn image_url(path: &str, size: &str) -> String {
    if path.is_empty() || path.starts_with("http") {
        return path.to_string();
    }
    format!("{TMDB_IMAGE_BASE}/{size}{path}")
}

pub struct TmdbClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl TmdbClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: TMDB_API_BASE.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn from_config(config: &crate::config::CatalogConfig) -> Self {
        Self::new(config.resolved_api_key()).with_base_url(config.api_base.clone())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(query)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Catalog(format!(
                "{} returned {}",
                path,
                response.status()
            )));
        }

        Ok(response.json().await?)
    }
}

#[derive(Deserialize)]
struct TmdbListResponse {
    #[serde(default)]
    results: Vec<TmdbSeries>,
}

#[derive(Deserialize)]
struct TmdbSeries {
    id: u64,
    name: String,
    original_name: Option<String>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    overview: Option<String>,
    first_air_date: Option<String>,
    vote_average: Option<f64>,
}

#[derive(Deserialize)]
struct TmdbSeriesDetails {
    id: u64,
    name: String,
    original_name: Option<String>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    overview: Option<String>,
    first_air_date: Option<String>,
    status: Option<String>,
    vote_average: Option<f64>,
    #[serde(default)]
    genres: Vec<TmdbGenre>,
    #[serde(default)]
    seasons: Vec<TmdbSeason>,
}

#[derive(Deserialize)]
struct TmdbGenre {
    id: u64,
    name: String,
}

#[derive(Deserialize)]
struct TmdbSeason {
    season_number: u32,
    #[serde(default)]
    episode_count: u32,
    name: Option<String>,
    air_date: Option<String>,
}

#[derive(Deserialize)]
struct TmdbSeasonDetails {
    season_number: u32,
    name: Option<String>,
    overview: Option<String>,
    #[serde(default)]
    episodes: Vec<TmdbEpisode>,
}

#[derive(Deserialize)]
struct TmdbEpisode {
    episode_number: u32,
    name: Option<String>,
    overview: Option<String>,
    air_date: Option<String>,
}

impl From<TmdbSeries> for CatalogSeries {
    fn from(s: TmdbSeries) -> Self {
        CatalogSeries {
            id: s.id,
            title: s.name,
            original_title: s.original_name,
            poster_path: s.poster_path,
            backdrop_path: s.backdrop_path,
            overview: s.overview,
            first_air_date: s.first_air_date,
            vote_average: s.vote_average,
        }
    }
}

#[async_trait::async_trait]
impl CatalogProvider for TmdbClient {
    async fn search(&self, query: &str) -> Result<Vec<CatalogSeries>> {
        let resp: TmdbListResponse = self.get_json("/search/tv", &[("query", query)]).await?;
        Ok(resp.results.into_iter().map(Into::into).collect())
    }

    async fn details(&self, id: u64) -> Result<SeriesDetails> {
        let d: TmdbSeriesDetails = self.get_json(&format!("/tv/{id}"), &[]).await?;
        Ok(SeriesDetails {
            id: d.id,
            title: d.name,
            original_title: d.original_name,
            poster_path: d.poster_path,
            backdrop_path: d.backdrop_path,
            overview: d.overview,
            first_air_date: d.first_air_date,
            status: d.status,
            vote_average: d.vote_average,
            genres: d
                .genres
                .into_iter()
                .map(|g| Genre {
                    id: g.id,
                    name: g.name,
                })
                .collect(),
            seasons: d
                .seasons
                .into_iter()
                .map(|s| CatalogSeason {
                    season_number: s.season_number,
                    name: s.name,
                    episode_count: s.episode_count,
                    air_date: s.air_date,
                })
                .collect(),
        })
    }

    async fn season(&self, id: u64, season_number: u32) -> Result<SeasonDetails> {
        let d: TmdbSeasonDetails = self
            .get_json(&format!("/tv/{id}/season/{season_number}"), &[])
            .await?;
        Ok(SeasonDetails {
            season_number: d.season_number,
            name: d.name,
            overview: d.overview,
            episodes: d
                .episodes
                .into_iter()
                .map(|e| CatalogEpisode {
                    episode_number: e.episode_number,
                    name: e.name,
                    overview: e.overview,
                    air_date: e.air_date,
                })
                .collect(),
        })
    }

    async fn recommendations(&self, id: u64) -> Result<Vec<CatalogSeries>> {
        let resp: TmdbListResponse = self
            .get_json(&format!("/tv/{id}/recommendations"), &[])
            .await?;
        let mut results: Vec<CatalogSeries> = resp.results.into_iter().map(Into::into).collect();
        results.truncate(10);
        Ok(results)
    }

    async fn similar(&self, id: u64) -> Result<Vec<CatalogSeries>> {
        let resp: TmdbListResponse = self.get_json(&format!("/tv/{id}/similar"), &[]).await?;
        let mut results: Vec<CatalogSeries> = resp.results.into_iter().map(Into::into).collect();
        results.truncate(10);
        Ok(results)
    }

    async fn trending(&self) -> Result<Vec<CatalogSeries>> {
        let resp: TmdbListResponse = self.get_json("/trending/tv/day", &[]).await?;
        let mut results: Vec<CatalogSeries> = resp.results.into_iter().map(Into::into).collect();
        results.truncate(20);
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poster_url_sizes() {
        assert_eq!(
            poster_url("/abc.jpg", PosterSize::W342),
            "https://image.tmdb.org/t/p/w342/abc.jpg"
        );
        assert_eq!(
            poster_url("/abc.jpg", PosterSize::W500),
            "https://image.tmdb.org/t/p/w500/abc.jpg"
        );
        assert_eq!(
            backdrop_url("/b.jpg", BackdropSize::Original),
            "https://image.tmdb.org/t/p/original/b.jpg"
        );
    }

    #[test]
    fn test_image_url_passthrough() {
        assert_eq!(poster_url("", PosterSize::W185), "");
        assert_eq!(
            poster_url("https://example.com/x.jpg", PosterSize::W185),
            "https://example.com/x.jpg"
        );
    }

    #[test]
    fn test_decode_search_response() {
        let payload = r#"{
            "page": 1,
            "results": [
                {
                    "id": 1396,
                    "name": "Breaking Bad",
                    "original_name": "Breaking Bad",
                    "poster_path": "/ztkUQFLlC19CCMYHW9o1zWhJRNq.jpg",
                    "overview": "A chemistry teacher...",
                    "first_air_date": "2008-01-20",
                    "vote_average": 8.9
                }
            ]
        }"#;

        let resp: TmdbListResponse = serde_json::from_str(payload).unwrap();
        let series: Vec<CatalogSeries> = resp.results.into_iter().map(Into::into).collect();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].id, 1396);
        assert_eq!(series[0].title, "Breaking Bad");
        assert_eq!(series[0].backdrop_path, None);
    }

    #[test]
    fn test_decode_details_response() {
        let payload = r#"{
            "id": 1396,
            "name": "Breaking Bad",
            "status": "Ended",
            "genres": [{"id": 18, "name": "Drama"}],
            "seasons": [
                {"season_number": 0, "episode_count": 11, "name": "Specials"},
                {"season_number": 1, "episode_count": 7, "name": "Season 1", "air_date": "2008-01-20"}
            ]
        }"#;

        let d: TmdbSeriesDetails = serde_json::from_str(payload).unwrap();
        assert_eq!(d.genres.len(), 1);
        assert_eq!(d.seasons.len(), 2);
        assert_eq!(d.seasons[1].episode_count, 7);
        assert_eq!(d.status.as_deref(), Some("Ended"));
    }

    #[test]
    fn test_decode_empty_results() {
        let resp: TmdbListResponse = serde_json::from_str(r#"{"page": 1, "results": []}"#).unwrap();
        assert!(resp.results.is_empty());
    }
}
