/// Movie metadata provider abstraction
///
/// This module provides a pluggable architecture for the upstream metadata
/// sources (TMDB, OMDB). Each deployment wires exactly one provider; the
/// handlers only ever see this trait.
use crate::{
    error::{AppError, AppResult},
    models::{MovieDetails, MovieSummary},
};

pub mod omdb;
pub mod tmdb;

/// Search results are capped at the adapter boundary, in upstream order
pub const SEARCH_RESULT_CAP: usize = 10;

/// The trending feed allows a slightly larger page
pub const TRENDING_RESULT_CAP: usize = 12;

/// Trait for upstream movie metadata providers
#[async_trait::async_trait]
pub trait MovieProvider: Send + Sync {
    /// Search for movies by free-text query
    ///
    /// Returns at most [`SEARCH_RESULT_CAP`] results, preserving the order
    /// the upstream returned them in.
    async fn search(&self, query: &str) -> AppResult<Vec<MovieSummary>>;

    /// Fetch the full record for one provider-native id
    async fn details(&self, id: &str) -> AppResult<MovieDetails>;

    /// Fetch this week's trending movies, at most [`TRENDING_RESULT_CAP`]
    ///
    /// Providers without a trending feed return `NotFound`.
    async fn trending(&self) -> AppResult<Vec<MovieSummary>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Drops everything past `cap`, never reordering what is kept
pub(crate) fn cap_results<T>(mut items: Vec<T>, cap: usize) -> Vec<T> {
    items.truncate(cap);
    items
}

/// Issues one GET request and fully reads the body
///
/// Reading to completion on every path is what releases the connection back
/// to the pool, including when the caller goes on to reject the body.
/// Network-level failures map to `Transport`; any HTTP status comes back for
/// provider-specific interpretation.
pub(crate) async fn fetch(
    request: reqwest::RequestBuilder,
) -> AppResult<(reqwest::StatusCode, String)> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;
    Ok((status, body))
}

/// Rejects empty and whitespace-only inputs before any network traffic
pub(crate) fn require_non_empty(value: &str, what: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::InvalidInput(format!("{} cannot be empty", what)));
    }
    Ok(())
}
