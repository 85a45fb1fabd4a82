/// TMDB provider (api.themoviedb.org)
///
/// Sends both credentials on every call: the v3 API key as a query parameter
/// and the v4 read access token as a bearer header. Some TMDB endpoints
/// accept the key alone, but not all of them, so the pair always travels
/// together.
///
/// Unlike OMDB, TMDB never flags failures in-body: an empty `results` array
/// is a legitimate empty outcome, and a missing record surfaces as an
/// upstream 404.
use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{MovieDetails, MovieSummary, TmdbMovieDetails, TmdbSearchResponse},
    services::providers::{
        cap_results, fetch, require_non_empty, MovieProvider, SEARCH_RESULT_CAP,
        TRENDING_RESULT_CAP,
    },
};
use reqwest::{Client as HttpClient, StatusCode};

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    access_token: String,
    api_url: String,
}

impl TmdbProvider {
    /// Builds the provider from startup configuration
    ///
    /// Both credentials are validated here, once; the request path never
    /// re-reads the environment.
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let api_key = config
            .tmdb_api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| AppError::Config("TMDB_API_KEY is not configured".to_string()))?;
        let access_token = config
            .tmdb_access_token
            .clone()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Config("TMDB_ACCESS_TOKEN is not configured".to_string()))?;

        Ok(Self {
            http_client: HttpClient::new(),
            api_key,
            access_token,
            api_url: config.tmdb_api_url.clone(),
        })
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.http_client
            .get(format!("{}{}", self.api_url, path))
            .bearer_auth(&self.access_token)
            .query(&[("api_key", self.api_key.as_str())])
    }

    fn decode<T: serde::de::DeserializeOwned>(body: &str) -> AppResult<T> {
        serde_json::from_str(body)
            .map_err(|e| AppError::Upstream(format!("Failed to parse TMDB response: {}", e)))
    }

    fn upstream_error(status: StatusCode, body: String) -> AppError {
        AppError::Upstream(format!("TMDB API returned status {}: {}", status, body))
    }
}

#[async_trait::async_trait]
impl MovieProvider for TmdbProvider {
    async fn search(&self, query: &str) -> AppResult<Vec<MovieSummary>> {
        require_non_empty(query, "Search query")?;

        let request = self.get("/search/movie").query(&[("query", query)]);
        let (status, body) = fetch(request).await?;

        if !status.is_success() {
            return Err(Self::upstream_error(status, body));
        }

        let envelope: TmdbSearchResponse = Self::decode(&body)?;

        // No failure flag to check: an empty results array is a valid,
        // non-error outcome
        let movies: Vec<MovieSummary> = cap_results(envelope.results, SEARCH_RESULT_CAP)
            .into_iter()
            .map(MovieSummary::from)
            .collect();

        tracing::info!(
            query = %query,
            results = movies.len(),
            provider = "tmdb",
            "Movie search completed"
        );

        Ok(movies)
    }

    async fn details(&self, id: &str) -> AppResult<MovieDetails> {
        require_non_empty(id, "Movie id")?;

        // credits and videos ride along in the same call, avoiding follow-up
        // fetches per movie
        let request = self
            .get(&format!("/movie/{}", id))
            .query(&[("append_to_response", "credits,videos")]);
        let (status, body) = fetch(request).await?;

        if status == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!("No movie found for id {}", id)));
        }
        if !status.is_success() {
            return Err(Self::upstream_error(status, body));
        }

        let envelope: TmdbMovieDetails = Self::decode(&body)?;
        let details = MovieDetails::from(envelope);

        tracing::info!(id = %id, provider = "tmdb", "Movie details fetched");

        Ok(details)
    }

    async fn trending(&self) -> AppResult<Vec<MovieSummary>> {
        let request = self.get("/trending/movie/week");
        let (status, body) = fetch(request).await?;

        if !status.is_success() {
            return Err(Self::upstream_error(status, body));
        }

        let envelope: TmdbSearchResponse = Self::decode(&body)?;
        let movies: Vec<MovieSummary> = cap_results(envelope.results, TRENDING_RESULT_CAP)
            .into_iter()
            .map(MovieSummary::from)
            .collect();

        tracing::info!(
            results = movies.len(),
            provider = "tmdb",
            "Trending list fetched"
        );

        Ok(movies)
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
