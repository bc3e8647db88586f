use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult, FETCH_FALLBACK_MESSAGE};

pub mod search_record;
pub mod view;

pub use search_record::{NewSearchRecord, SearchRecord};
pub use view::{FetchState, TrendingEntry, ViewSnapshot, ViewStatus};

/// A movie as returned by the metadata API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub original_language: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub popularity: Option<f64>,
}

impl Movie {
    /// Full poster URL under the given image base, if the movie has a poster
    pub fn poster_url(&self, base: &str) -> Option<String> {
        self.poster_path
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(|path| format!("{}{}", base.trim_end_matches('/'), path))
    }
}

/// Which listing a fetch asks the metadata API for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieQuery {
    /// Popular titles, most popular first
    Discover,
    /// Free-text title search
    Search(String),
}

impl MovieQuery {
    /// Blank terms (empty or whitespace only) fall back to the discover listing
    pub fn from_term(term: Option<&str>) -> Self {
        match term {
            Some(t) if !t.trim().is_empty() => MovieQuery::Search(t.to_string()),
            _ => MovieQuery::Discover,
        }
    }

    pub fn search_term(&self) -> Option<&str> {
        match self {
            MovieQuery::Discover => None,
            MovieQuery::Search(term) => Some(term),
        }
    }
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Raw list payload from /discover/movie and /search/movie
///
/// Besides `results`, a payload may flag itself as failed either the OMDb way
/// (`"Response": "False"` with `"Error"`) or the TMDB way (`"success": false`
/// with `"status_message"`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MoviePage {
    #[serde(default)]
    pub results: Option<Vec<Movie>>,
    #[serde(rename = "Response", default)]
    pub response: Option<String>,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub status_message: Option<String>,
}

impl MoviePage {
    /// Failure message when the payload signals failure, `None` otherwise
    pub fn failure(&self) -> Option<String> {
        let flagged_response = self
            .response
            .as_deref()
            .is_some_and(|r| r.eq_ignore_ascii_case("false"));

        if flagged_response {
            return Some(non_blank_or_fallback(self.error.as_deref()));
        }
        if self.success == Some(false) {
            return Some(non_blank_or_fallback(self.status_message.as_deref()));
        }
        None
    }

    pub fn into_movies(self) -> AppResult<Vec<Movie>> {
        if let Some(message) = self.failure() {
            return Err(AppError::Api(message));
        }
        Ok(self.results.unwrap_or_default())
    }
}

fn non_blank_or_fallback(message: Option<&str>) -> String {
    message
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .unwrap_or(FETCH_FALLBACK_MESSAGE)
        .to_string()
}
