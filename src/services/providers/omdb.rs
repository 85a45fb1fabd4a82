/// OMDB provider (omdbapi.com)
///
/// The legacy plot-database API. Everything goes through one endpoint with
/// query parameters selecting the operation (`s` for search, `i` for detail
/// lookup), and failures come back as HTTP 200 with an in-body
/// `"Response":"False"` flag plus an optional human-readable `Error` string.
///
/// The API key is optional at startup: without it this deployment still
/// boots, and every call reports a configuration error instead.
use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{MovieDetails, MovieSummary, OmdbMovieDetails, OmdbSearchResponse},
    services::providers::{
        cap_results, fetch, require_non_empty, MovieProvider, SEARCH_RESULT_CAP,
    },
};
use reqwest::{Client as HttpClient, StatusCode};

#[derive(Clone)]
pub struct OmdbProvider {
    http_client: HttpClient,
    api_key: Option<String>,
    api_url: String,
}

impl OmdbProvider {
    pub fn from_config(config: &Config) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key: config.omdb_api_key.clone().filter(|k| !k.is_empty()),
            api_url: config.omdb_api_url.clone(),
        }
    }

    fn key(&self) -> AppResult<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| AppError::Config("OMDB_API_KEY is not configured".to_string()))
    }

    fn decode<T: serde::de::DeserializeOwned>(body: &str) -> AppResult<T> {
        serde_json::from_str(body)
            .map_err(|e| AppError::Upstream(format!("Failed to parse OMDB response: {}", e)))
    }

    fn upstream_error(status: StatusCode, body: String) -> AppError {
        AppError::Upstream(format!("OMDB API returned status {}: {}", status, body))
    }

    /// Turns an in-body failure into the outward error, preferring the
    /// provider's own message over the fallback
    fn failure(error: Option<String>, fallback: &str) -> AppError {
        AppError::NotFound(
            error
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| fallback.to_string()),
        )
    }
}

#[async_trait::async_trait]
impl MovieProvider for OmdbProvider {
    async fn search(&self, query: &str) -> AppResult<Vec<MovieSummary>> {
        require_non_empty(query, "Search query")?;
        let key = self.key()?;

        let request = self
            .http_client
            .get(&self.api_url)
            .query(&[("apikey", key), ("s", query)]);
        let (status, body) = fetch(request).await?;

        if !status.is_success() {
            return Err(Self::upstream_error(status, body));
        }

        let envelope: OmdbSearchResponse = Self::decode(&body)?;
        if envelope.is_failure() {
            // OMDB reports "no results" through the flag, never through the
            // HTTP status
            return Err(Self::failure(envelope.error, "No results found"));
        }

        let movies: Vec<MovieSummary> = cap_results(envelope.search, SEARCH_RESULT_CAP)
            .into_iter()
            .map(MovieSummary::from)
            .collect();

        tracing::info!(
            query = %query,
            results = movies.len(),
            provider = "omdb",
            "Movie search completed"
        );

        Ok(movies)
    }

    async fn details(&self, id: &str) -> AppResult<MovieDetails> {
        require_non_empty(id, "Movie id")?;
        let key = self.key()?;

        let request = self
            .http_client
            .get(&self.api_url)
            .query(&[("apikey", key), ("i", id), ("plot", "full")]);
        let (status, body) = fetch(request).await?;

        if !status.is_success() {
            return Err(Self::upstream_error(status, body));
        }

        let envelope: OmdbMovieDetails = Self::decode(&body)?;
        if envelope.is_failure() {
            return Err(Self::failure(envelope.error, "Movie not found"));
        }

        let details = MovieDetails::from(envelope);

        tracing::info!(id = %id, provider = "omdb", "Movie details fetched");

        Ok(details)
    }

    async fn trending(&self) -> AppResult<Vec<MovieSummary>> {
        // OMDB has no trending feed
        Err(AppError::NotFound(
            "Trending is not available for this provider".to_string(),
        ))
    }

    fn name(&self) -> &'static str {
        "omdb"
    }
}
