pub mod analytics;
pub mod providers;

pub use analytics::{AnalyticsRecorder, RecorderHandle};
pub use providers::{MovieProvider, TmdbProvider};
