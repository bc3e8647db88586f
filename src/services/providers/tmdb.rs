/// TMDB API provider
///
/// Provides the two listings the browser needs:
/// 1. Discover: /discover/movie?sort_by=popularity.desc (blank search box)
/// 2. Search: /search/movie?query={term} (anything typed)
///
/// Both authenticate with the v4 read access token as a bearer credential.
use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{Movie, MoviePage, MovieQuery},
    services::providers::MovieProvider,
};
use reqwest::{header, Client as HttpClient};
use std::time::Duration;

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbProvider {
    /// Creates a new TMDB provider
    ///
    /// Fails if the API key is blank or the HTTP client cannot be built.
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> AppResult<Self> {
        if api_key.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "TMDB API key cannot be empty".to_string(),
            ));
        }

        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(
            config.tmdb_api_key.clone(),
            config.tmdb_api_url.clone(),
            config.request_timeout(),
        )
    }

    /// Full request URL for a query; search terms are percent-encoded once
    fn endpoint(&self, query: &MovieQuery) -> String {
        match query {
            MovieQuery::Discover => {
                format!("{}/discover/movie?sort_by=popularity.desc", self.api_url)
            }
            MovieQuery::Search(term) => format!(
                "{}/search/movie?query={}",
                self.api_url,
                urlencoding::encode(term)
            ),
        }
    }
}

#[async_trait::async_trait]
impl MovieProvider for TmdbProvider {
    async fn fetch_movies(&self, query: &MovieQuery) -> AppResult<Vec<Movie>> {
        let url = self.endpoint(query);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.api_key)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Network(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        let page: MoviePage = response.json().await?;

        let movies = page.into_movies().inspect_err(|e| {
            tracing::warn!(error = %e, provider = "tmdb", "TMDB payload flagged failure");
        })?;

        tracing::info!(
            query = ?query.search_term(),
            results = movies.len(),
            provider = "tmdb",
            "Movie fetch completed"
        );

        Ok(movies)
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_provider() -> TmdbProvider {
        TmdbProvider::new(
            "test_key".to_string(),
            "http://test.local/3/".to_string(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_new_rejects_blank_key() {
        let result = TmdbProvider::new(
            " ".to_string(),
            "http://test.local".to_string(),
            Duration::from_secs(5),
        );
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_discover_endpoint() {
        let provider = create_test_provider();
        assert_eq!(
            provider.endpoint(&MovieQuery::Discover),
            "http://test.local/3/discover/movie?sort_by=popularity.desc"
        );
    }

    #[test]
    fn test_search_endpoint_encodes_space() {
        let provider = create_test_provider();
        assert_eq!(
            provider.endpoint(&MovieQuery::Search("spider man".to_string())),
            "http://test.local/3/search/movie?query=spider%20man"
        );
    }

    #[test]
    fn test_search_endpoint_encodes_reserved_characters() {
        let provider = create_test_provider();
        assert_eq!(
            provider.endpoint(&MovieQuery::Search("fast & furious?".to_string())),
            "http://test.local/3/search/movie?query=fast%20%26%20furious%3F"
        );
    }

    #[test]
    fn test_name() {
        assert_eq!(create_test_provider().name(), "tmdb");
    }
}
