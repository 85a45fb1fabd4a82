use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::{MovieDetails, MovieSummary},
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    query: Option<String>,
}

/// Handler for the movie search endpoint
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<MovieSummary>>> {
    let query = params
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::InvalidInput("Query parameter is required".to_string()))?;

    let movies = state.provider.search(query).await?;
    Ok(Json(movies))
}

/// Handler for the movie detail endpoint
pub async fn details(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MovieDetails>> {
    let id = id.trim();
    if id.is_empty() {
        return Err(AppError::InvalidInput("Movie id is required".to_string()));
    }

    let details = state.provider.details(id).await?;
    Ok(Json(details))
}

/// Handler for `/api/movie` and `/api/movie/` with no id at all
pub async fn details_missing_id() -> AppError {
    AppError::InvalidInput("Movie id is required".to_string())
}

/// Handler for the weekly trending endpoint
pub async fn trending(State(state): State<AppState>) -> AppResult<Json<Vec<MovieSummary>>> {
    let movies = state.provider.trending().await?;
    Ok(Json(movies))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::create_router;
    use crate::services::providers::MovieProvider;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use mockall::mock;
    use std::sync::Arc;

    mock! {
        Provider {}

        #[async_trait::async_trait]
        impl MovieProvider for Provider {
            async fn search(&self, query: &str) -> AppResult<Vec<MovieSummary>>;
            async fn details(&self, id: &str) -> AppResult<MovieDetails>;
            async fn trending(&self) -> AppResult<Vec<MovieSummary>>;
            fn name(&self) -> &'static str;
        }
    }

    fn server_with(provider: MockProvider) -> TestServer {
        let app = create_router(AppState {
            provider: Arc::new(provider),
        });
        TestServer::new(app).unwrap()
    }

    fn summary(id: &str, title: &str) -> MovieSummary {
        MovieSummary {
            id: id.to_string(),
            title: title.to_string(),
            release_date: None,
            poster_url: None,
            rating: None,
            overview: None,
        }
    }

    #[tokio::test]
    async fn test_search_passes_query_through() {
        let mut provider = MockProvider::new();
        provider
            .expect_search()
            .withf(|query| query == "batman")
            .returning(|_| Ok(vec![summary("268", "Batman")]));

        let server = server_with(provider);
        let response = server.get("/api/search").add_query_param("query", "batman").await;

        response.assert_status_ok();
        let movies: Vec<MovieSummary> = response.json();
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].title, "Batman");
    }

    #[tokio::test]
    async fn test_search_without_query_is_400_with_json_error() {
        let provider = MockProvider::new();
        let server = server_with(provider);

        let response = server.get("/api/search").await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_search_with_blank_query_is_400() {
        let provider = MockProvider::new();
        let server = server_with(provider);

        let response = server.get("/api/search").add_query_param("query", "   ").await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_search_not_found_maps_to_404() {
        let mut provider = MockProvider::new();
        provider
            .expect_search()
            .returning(|_| Err(AppError::NotFound("Movie not found!".to_string())));

        let server = server_with(provider);
        let response = server.get("/api/search").add_query_param("query", "zzzz").await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "Movie not found!");
    }

    #[tokio::test]
    async fn test_search_config_error_maps_to_500() {
        let mut provider = MockProvider::new();
        provider
            .expect_search()
            .returning(|_| Err(AppError::Config("OMDB_API_KEY is not configured".to_string())));

        let server = server_with(provider);
        let response = server.get("/api/search").add_query_param("query", "batman").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "OMDB_API_KEY is not configured");
    }

    #[tokio::test]
    async fn test_details_passes_id_through() {
        let mut provider = MockProvider::new();
        provider
            .expect_details()
            .withf(|id| id == "tt0111161")
            .returning(|id| {
                Ok(MovieDetails {
                    id: id.to_string(),
                    title: "The Shawshank Redemption".to_string(),
                    release_date: None,
                    poster_url: None,
                    rating: None,
                    overview: None,
                    rated: None,
                    runtime_minutes: None,
                    genres: vec![],
                    crew: vec![],
                    cast: vec![],
                    countries: vec![],
                    languages: vec![],
                    ratings: Default::default(),
                    box_office: None,
                    production: vec![],
                    videos: vec![],
                })
            });

        let server = server_with(provider);
        let response = server.get("/api/movie/tt0111161").await;

        response.assert_status_ok();
        let details: MovieDetails = response.json();
        assert_eq!(details.id, "tt0111161");
    }

    #[tokio::test]
    async fn test_details_without_id_is_400() {
        let provider = MockProvider::new();
        let server = server_with(provider);

        let response = server.get("/api/movie/").await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "Movie id is required");
    }

    #[tokio::test]
    async fn test_trending_returns_provider_list() {
        let mut provider = MockProvider::new();
        provider
            .expect_trending()
            .returning(|| Ok(vec![summary("1", "Trending One"), summary("2", "Trending Two")]));

        let server = server_with(provider);
        let response = server.get("/api/trending").await;

        response.assert_status_ok();
        let movies: Vec<MovieSummary> = response.json();
        assert_eq!(movies.len(), 2);
    }

    #[tokio::test]
    async fn test_trending_unsupported_maps_to_404() {
        let mut provider = MockProvider::new();
        provider.expect_trending().returning(|| {
            Err(AppError::NotFound(
                "Trending is not available for this provider".to_string(),
            ))
        });

        let server = server_with(provider);
        let response = server.get("/api/trending").await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_responses_carry_a_request_id() {
        let provider = MockProvider::new();
        let server = server_with(provider);

        let response = server.get("/health").await;
        response.assert_status_ok();
        assert!(response
            .headers()
            .contains_key(crate::middleware::request_id::REQUEST_ID_HEADER));
    }
}
