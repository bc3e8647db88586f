//! Movie metadata provider abstraction
//!
//! The view controller only needs "give me the movies for this query"; keeping
//! that behind a trait lets the TMDB client be swapped for a stub in tests.
use tracing::instrument;

use crate::{
    error::AppResult,
    models::{Movie, MovieQuery},
};

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for movie metadata providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieProvider: Send + Sync {
    /// Fetch the movie list for a query
    ///
    /// `MovieQuery::Discover` lists popular titles, `MovieQuery::Search` runs a
    /// title search. An empty result list is a success. No retries or caching:
    /// every call is a fresh request.
    async fn fetch_movies(&self, query: &MovieQuery) -> AppResult<Vec<Movie>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Fetch movies for a raw search term, discover listing when the term is blank
#[instrument(skip(provider), fields(provider = provider.name()))]
pub async fn fetch_for_term(provider: &dyn MovieProvider, term: &str) -> AppResult<Vec<Movie>> {
    let query = MovieQuery::from_term(Some(term));
    provider.fetch_movies(&query).await
}
