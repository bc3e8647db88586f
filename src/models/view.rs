use serde::Serialize;

use super::{Movie, SearchRecord};

/// Outcome of the most recent fetch cycle
///
/// Results and the error message live in different variants, so a view can
/// never show stale movies next to a fresh error.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState {
    Loading,
    Error(String),
    Success(Vec<Movie>),
}

impl FetchState {
    pub fn status(&self) -> ViewStatus {
        match self {
            FetchState::Loading => ViewStatus::Loading,
            FetchState::Error(_) => ViewStatus::Error,
            FetchState::Success(_) => ViewStatus::Success,
        }
    }

    pub fn movies(&self) -> &[Movie] {
        match self {
            FetchState::Success(movies) => movies,
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ViewStatus {
    Loading,
    Error,
    Success,
}

/// One row of the trending list, ranked from 1
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TrendingEntry {
    pub rank: usize,
    pub search_term: String,
    pub poster_url: String,
    pub movie_id: u64,
    pub count: u64,
}

impl TrendingEntry {
    pub fn ranked(records: &[SearchRecord]) -> Vec<Self> {
        records
            .iter()
            .enumerate()
            .map(|(i, r)| TrendingEntry {
                rank: i + 1,
                search_term: r.search_term.clone(),
                poster_url: r.poster_url.clone(),
                movie_id: r.movie_id,
                count: r.count,
            })
            .collect()
    }
}

/// What a page needs to draw itself
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ViewSnapshot {
    pub search_term: String,
    pub debounced_term: String,
    pub status: ViewStatus,
    pub movies: Vec<Movie>,
    pub error: Option<String>,
    pub trending: Vec<TrendingEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: u64) -> Movie {
        Movie {
            id,
            title: format!("Movie {}", id),
            overview: None,
            poster_path: None,
            backdrop_path: None,
            release_date: None,
            original_language: None,
            vote_average: None,
            popularity: None,
        }
    }

    #[test]
    fn test_error_state_has_no_movies() {
        let state = FetchState::Error("boom".to_string());
        assert_eq!(state.status(), ViewStatus::Error);
        assert!(state.movies().is_empty());
        assert_eq!(state.error(), Some("boom"));
    }

    #[test]
    fn test_success_state_has_no_error() {
        let state = FetchState::Success(vec![movie(1), movie(2)]);
        assert_eq!(state.movies().len(), 2);
        assert_eq!(state.error(), None);
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&ViewStatus::Loading).unwrap(),
            "\"loading\""
        );
    }

    #[test]
    fn test_trending_ranks_start_at_one() {
        let records = vec![
            SearchRecord {
                id: "a".to_string(),
                search_term: "batman".to_string(),
                count: 3,
                movie_id: 268,
                poster_url: "p1".to_string(),
                created_at: None,
            },
            SearchRecord {
                id: "b".to_string(),
                search_term: "alien".to_string(),
                count: 1,
                movie_id: 348,
                poster_url: "p2".to_string(),
                created_at: None,
            },
        ];

        let ranked = TrendingEntry::ranked(&records);
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[0].search_term, "batman");
        assert_eq!(ranked[1].rank, 2);
    }
}
