use serde::Deserialize;
use std::time::Duration;

/// Which document store backs search analytics
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnalyticsBackend {
    #[default]
    Memory,
    Redis,
    Appwrite,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API read access token, sent as a bearer credential
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Prefix joined with a movie's poster path to build a poster URL
    #[serde(default = "default_poster_base_url")]
    pub poster_base_url: String,

    /// Quiet period before a typed search term is acted on
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Number of trending searches shown in the view
    #[serde(default = "default_trending_limit")]
    pub trending_limit: usize,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub analytics_backend: AnalyticsBackend,

    /// Redis connection URL
    #[serde(default = "default_redis_url")]
    pub redis_url: String,

    pub appwrite_endpoint: Option<String>,
    pub appwrite_project_id: Option<String>,
    pub appwrite_api_key: Option<String>,
    pub appwrite_database_id: Option<String>,
    pub appwrite_collection_id: Option<String>,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Connection details for the Appwrite documents API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppwriteSettings {
    pub endpoint: String,
    pub project_id: String,
    pub api_key: String,
    pub database_id: String,
    pub collection_id: String,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_poster_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_debounce_ms() -> u64 {
    500
}

fn default_trending_limit() -> usize {
    5
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from an explicit set of variables
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects configurations the service cannot start with
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.tmdb_api_key.trim().is_empty() {
            anyhow::bail!("TMDB_API_KEY must not be empty");
        }
        if self.trending_limit == 0 {
            anyhow::bail!("TRENDING_LIMIT must be at least 1");
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("REQUEST_TIMEOUT_SECS must be at least 1");
        }
        if self.analytics_backend == AnalyticsBackend::Appwrite {
            self.appwrite()?;
        }
        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Collects the Appwrite settings, failing on the first missing one
    pub fn appwrite(&self) -> anyhow::Result<AppwriteSettings> {
        fn required(value: &Option<String>, name: &str) -> anyhow::Result<String> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .ok_or_else(|| anyhow::anyhow!("{} is required for the appwrite backend", name))
        }

        Ok(AppwriteSettings {
            endpoint: required(&self.appwrite_endpoint, "APPWRITE_ENDPOINT")?
                .trim_end_matches('/')
                .to_string(),
            project_id: required(&self.appwrite_project_id, "APPWRITE_PROJECT_ID")?,
            api_key: required(&self.appwrite_api_key, "APPWRITE_API_KEY")?,
            database_id: required(&self.appwrite_database_id, "APPWRITE_DATABASE_ID")?,
            collection_id: required(&self.appwrite_collection_id, "APPWRITE_COLLECTION_ID")?,
        })
    }
}
