/// Appwrite documents API store
///
/// API Flow:
/// 1. Lookup: GET  /databases/{db}/collections/{collection}/documents?queries[]=equal(searchTerm)
/// 2. Create: POST /databases/{db}/collections/{collection}/documents
/// 3. Update: PATCH /databases/{db}/collections/{collection}/documents/{id}
/// 4. Leaderboard: GET with orderDesc(count) and limit(n)
///
/// Queries use the JSON encoding understood by Appwrite 1.5+.
use crate::{
    config::AppwriteSettings,
    db::AnalyticsStore,
    error::{AppError, AppResult},
    models::{NewSearchRecord, SearchRecord},
};
use reqwest::{header, Client as HttpClient, Method, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use uuid::Uuid;

const PROJECT_HEADER: &str = "X-Appwrite-Project";
const KEY_HEADER: &str = "X-Appwrite-Key";

#[derive(Debug, Deserialize)]
struct DocumentList {
    #[serde(default)]
    documents: Vec<SearchRecord>,
}

#[derive(Debug, Serialize)]
struct CreateDocument<'a> {
    #[serde(rename = "documentId")]
    document_id: &'a str,
    data: &'a NewSearchRecord,
}

#[derive(Clone)]
pub struct AppwriteStore {
    http_client: HttpClient,
    settings: AppwriteSettings,
}

impl AppwriteStore {
    pub fn new(settings: AppwriteSettings, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(Self::transport)?;
        Ok(Self {
            http_client,
            settings,
        })
    }

    fn documents_url(&self) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.settings.endpoint, self.settings.database_id, self.settings.collection_id
        )
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http_client
            .request(method, url)
            .header(PROJECT_HEADER, &self.settings.project_id)
            .header(KEY_HEADER, &self.settings.api_key)
            .header(header::ACCEPT, "application/json")
    }

    fn equal_query(attribute: &str, value: &str) -> String {
        json!({ "method": "equal", "attribute": attribute, "values": [value] }).to_string()
    }

    fn order_desc_query(attribute: &str) -> String {
        json!({ "method": "orderDesc", "attribute": attribute }).to_string()
    }

    fn limit_query(limit: usize) -> String {
        json!({ "method": "limit", "values": [limit] }).to_string()
    }

    fn transport(e: reqwest::Error) -> AppError {
        AppError::Analytics(format!("Appwrite request failed: {}", e))
    }

    async fn check(response: Response) -> AppResult<Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(AppError::Analytics(format!(
            "Appwrite returned status {}: {}",
            status, body
        )))
    }

    async fn list(&self, queries: Vec<String>) -> AppResult<Vec<SearchRecord>> {
        let params: Vec<(&str, String)> = queries.into_iter().map(|q| ("queries[]", q)).collect();

        let response = self
            .request(Method::GET, &self.documents_url())
            .query(&params)
            .send()
            .await
            .map_err(Self::transport)?;

        let list: DocumentList = Self::check(response)
            .await?
            .json()
            .await
            .map_err(Self::transport)?;
        Ok(list.documents)
    }
}

#[async_trait::async_trait]
impl AnalyticsStore for AppwriteStore {
    async fn find_by_term(&self, term: &str) -> AppResult<Option<SearchRecord>> {
        let documents = self
            .list(vec![
                Self::equal_query("searchTerm", term),
                Self::limit_query(1),
            ])
            .await?;
        Ok(documents.into_iter().next())
    }

    async fn create(&self, record: NewSearchRecord) -> AppResult<SearchRecord> {
        let document_id = Uuid::new_v4().simple().to_string();

        let response = self
            .request(Method::POST, &self.documents_url())
            .json(&CreateDocument {
                document_id: &document_id,
                data: &record,
            })
            .send()
            .await
            .map_err(Self::transport)?;

        let created: SearchRecord = Self::check(response)
            .await?
            .json()
            .await
            .map_err(Self::transport)?;

        tracing::debug!(
            document_id = %created.id,
            term = %created.search_term,
            "Created search record"
        );

        Ok(created)
    }

    async fn increment(&self, record: &SearchRecord) -> AppResult<u64> {
        let url = format!("{}/{}", self.documents_url(), record.id);

        let response = self
            .request(Method::PATCH, &url)
            .json(&json!({ "data": { "count": record.count + 1 } }))
            .send()
            .await
            .map_err(Self::transport)?;

        let updated: SearchRecord = Self::check(response)
            .await?
            .json()
            .await
            .map_err(Self::transport)?;
        Ok(updated.count)
    }

    async fn top_by_count(&self, limit: usize) -> AppResult<Vec<SearchRecord>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        self.list(vec![
            Self::order_desc_query("count"),
            Self::limit_query(limit),
        ])
        .await
    }

    fn name(&self) -> &'static str {
        "appwrite"
    }
}
