use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One search-analytics document: how often a term was searched and the
/// top result it first produced
///
/// Field names follow the Appwrite collection schema.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchRecord {
    /// Document identifier assigned by the store
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "searchTerm")]
    pub search_term: String,
    pub count: u64,
    pub movie_id: u64,
    #[serde(default)]
    pub poster_url: String,
    #[serde(rename = "$createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Attributes of a record about to be created
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewSearchRecord {
    #[serde(rename = "searchTerm")]
    pub search_term: String,
    pub count: u64,
    pub movie_id: u64,
    pub poster_url: String,
}

impl NewSearchRecord {
    /// First occurrence of a term
    pub fn first(search_term: &str, movie_id: u64, poster_url: String) -> Self {
        Self {
            search_term: search_term.to_string(),
            count: 1,
            movie_id,
            poster_url,
        }
    }

    pub fn into_record(self, id: String) -> SearchRecord {
        SearchRecord {
            id,
            search_term: self.search_term,
            count: self.count,
            movie_id: self.movie_id,
            poster_url: self.poster_url,
            created_at: Some(Utc::now()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appwrite_document_deserialization() {
        let json = r#"{
            "$id": "65f1c2a9e0b1",
            "$createdAt": "2024-03-13T10:15:30.000+00:00",
            "$collectionId": "metrics",
            "searchTerm": "batman",
            "count": 4,
            "movie_id": 268,
            "poster_url": "https://image.tmdb.org/t/p/w500/cij4dd21v2Rk2YtUQbV5kW69WB2.jpg"
        }"#;

        let record: SearchRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "65f1c2a9e0b1");
        assert_eq!(record.search_term, "batman");
        assert_eq!(record.count, 4);
        assert_eq!(record.movie_id, 268);
        assert!(record.created_at.is_some());
    }

    #[test]
    fn test_new_record_serializes_with_schema_names() {
        let record = NewSearchRecord::first("batman", 268, "https://img/x.jpg".to_string());
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["searchTerm"], "batman");
        assert_eq!(json["count"], 1);
        assert_eq!(json["movie_id"], 268);
        assert_eq!(json["poster_url"], "https://img/x.jpg");
    }
}
