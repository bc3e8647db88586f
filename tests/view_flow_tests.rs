use std::sync::{Arc, Mutex};
use std::time::Duration;

use movie_browser::{
    db::{AnalyticsStore, MemoryStore},
    error::AppResult,
    models::{FetchState, Movie, MovieQuery},
    services::{AnalyticsRecorder, MovieProvider},
    view::{Debouncer, ViewController},
};

const QUIET: Duration = Duration::from_millis(500);
const POSTER_BASE: &str = "https://image.tmdb.org/t/p/w500";

fn movie(id: u64, poster: &str) -> Movie {
    Movie {
        id,
        title: format!("Movie {}", id),
        overview: None,
        poster_path: Some(poster.to_string()),
        backdrop_path: None,
        release_date: None,
        original_language: None,
        vote_average: None,
        popularity: None,
    }
}

#[derive(Default)]
struct RecordingProvider {
    queries: Mutex<Vec<MovieQuery>>,
}

impl RecordingProvider {
    fn queries(&self) -> Vec<MovieQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl MovieProvider for RecordingProvider {
    async fn fetch_movies(&self, query: &MovieQuery) -> AppResult<Vec<Movie>> {
        self.queries.lock().unwrap().push(query.clone());
        Ok(match query {
            MovieQuery::Discover => vec![movie(1, "/popular.jpg")],
            MovieQuery::Search(_) => vec![
                movie(268, "/batman.jpg"),
                movie(364, "/returns.jpg"),
                movie(414, "/forever.jpg"),
            ],
        })
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

#[tokio::test(start_paused = true)]
async fn test_typing_batman_fires_one_search_after_quiet_period() {
    let provider = Arc::new(RecordingProvider::default());
    let store = Arc::new(MemoryStore::new());
    let (recorder, handle) = AnalyticsRecorder::new(store.clone(), POSTER_BASE);
    let controller = ViewController::new(provider.clone(), recorder, 5);

    let input = Debouncer::spawn("", QUIET);
    tokio::spawn(controller.clone().run(input.subscribe()));

    // startup fetch for the empty term
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(provider.queries(), vec![MovieQuery::Discover]);

    for typed in ["b", "ba", "bat", "batm", "batma", "batman"] {
        input.set(typed);
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    // still inside the quiet period after the last keystroke
    assert_eq!(provider.queries(), vec![MovieQuery::Discover]);

    tokio::time::sleep(QUIET).await;
    assert_eq!(
        provider.queries(),
        vec![
            MovieQuery::Discover,
            MovieQuery::Search("batman".to_string())
        ]
    );
    assert_eq!(controller.fetch_state().await.movies().len(), 3);

    handle.shutdown().await;
    let record = store.find_by_term("batman").await.unwrap().unwrap();
    assert_eq!(record.count, 1);
    assert_eq!(record.movie_id, 268);
    assert_eq!(record.poster_url, "https://image.tmdb.org/t/p/w500/batman.jpg");
}

#[tokio::test(start_paused = true)]
async fn test_repeating_a_search_increments_its_record() {
    let provider = Arc::new(RecordingProvider::default());
    let store = Arc::new(MemoryStore::new());
    let (recorder, handle) = AnalyticsRecorder::new(store.clone(), POSTER_BASE);
    let controller = ViewController::new(provider.clone(), recorder, 5);

    let input = Debouncer::spawn("", QUIET);
    tokio::spawn(controller.clone().run(input.subscribe()));

    for term in ["batman", "", "batman"] {
        input.set(term);
        tokio::time::sleep(QUIET * 2).await;
    }

    handle.shutdown().await;
    assert_eq!(store.len().await, 1);
    assert_eq!(store.find_by_term("batman").await.unwrap().unwrap().count, 2);
    assert_eq!(provider.queries().len(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_clearing_the_search_returns_to_discover() {
    let provider = Arc::new(RecordingProvider::default());
    let store = Arc::new(MemoryStore::new());
    let (recorder, _handle) = AnalyticsRecorder::new(store, POSTER_BASE);
    let controller = ViewController::new(provider.clone(), recorder, 5);

    let input = Debouncer::spawn("", QUIET);
    tokio::spawn(controller.clone().run(input.subscribe()));

    input.set("heat");
    tokio::time::sleep(QUIET * 2).await;
    input.set("");
    tokio::time::sleep(QUIET * 2).await;

    assert_eq!(provider.queries().last(), Some(&MovieQuery::Discover));
    assert_eq!(
        controller.fetch_state().await,
        FetchState::Success(vec![movie(1, "/popular.jpg")])
    );
}

#[tokio::test(start_paused = true)]
async fn test_disposing_the_input_stops_the_controller() {
    let provider = Arc::new(RecordingProvider::default());
    let store = Arc::new(MemoryStore::new());
    let (recorder, _handle) = AnalyticsRecorder::new(store, POSTER_BASE);
    let controller = ViewController::new(provider.clone(), recorder, 5);

    let input = Debouncer::spawn("", QUIET);
    let view = tokio::spawn(controller.clone().run(input.subscribe()));

    input.set("jaws");
    tokio::time::sleep(Duration::from_millis(100)).await;
    drop(input);

    tokio::time::timeout(Duration::from_secs(5), view)
        .await
        .expect("view loop should end once the input is gone")
        .unwrap();
    // the pending "jaws" never reached the provider
    assert_eq!(provider.queries(), vec![MovieQuery::Discover]);
}
