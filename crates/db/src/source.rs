//! The query capability a check needs from the database.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{Bson, Document};
use mongodb::{Client, Collection};
use serde_json::Value;

use querycount_core::filter::FilterDocument;

use crate::config::ConnectionConfig;
use crate::error::DbError;

/// Count (and optionally return) the documents matching a filter.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Number of documents matching `filter`.
    async fn count(&self, filter: &FilterDocument) -> Result<u64, DbError>;

    /// Documents matching `filter`, as relaxed Extended JSON.
    async fn fetch(&self, filter: &FilterDocument) -> Result<Vec<Value>, DbError>;
}

/// Convert a filter into a BSON document.
///
/// Values are read as MongoDB Extended JSON, so `{"$date": ...}` becomes a
/// BSON datetime and `{"$oid": ...}` an ObjectId.
pub fn to_bson_filter(filter: &FilterDocument) -> Result<Document, DbError> {
    Document::try_from(filter.as_map().clone()).map_err(|e| DbError::InvalidFilter(e.to_string()))
}

/// A single MongoDB collection.
pub struct MongoSource {
    collection: Collection<Document>,
}

impl MongoSource {
    /// Build a client for `config` and bind to `database.collection`.
    ///
    /// The driver connects lazily; connection and authentication failures
    /// surface from the first query.
    pub fn connect(
        config: &ConnectionConfig,
        database: &str,
        collection: &str,
    ) -> Result<Self, DbError> {
        let client = Client::with_options(config.client_options(database))?;
        tracing::debug!(
            address = %config.address(),
            database,
            collection,
            tls = config.tls.is_some(),
            authenticated = config.credentials.is_some(),
            "MongoDB client created",
        );
        let collection = client.database(database).collection::<Document>(collection);
        Ok(Self { collection })
    }
}

#[async_trait]
impl DocumentSource for MongoSource {
    async fn count(&self, filter: &FilterDocument) -> Result<u64, DbError> {
        let filter = to_bson_filter(filter)?;
        let count = self.collection.count_documents(filter).await?;
        tracing::debug!(count, collection = %self.collection.name(), "Count query finished");
        Ok(count)
    }

    async fn fetch(&self, filter: &FilterDocument) -> Result<Vec<Value>, DbError> {
        let filter = to_bson_filter(filter)?;
        let documents: Vec<Document> = self.collection.find(filter).await?.try_collect().await?;
        Ok(documents
            .into_iter()
            .map(|doc| Bson::Document(doc).into_relaxed_extjson())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::TimeZone;
    use mongodb::bson::DateTime;

    use querycount_core::window::{apply_window, DEFAULT_DATE_FIELD};

    use super::*;

    #[test]
    fn window_clause_becomes_bson_datetime() {
        let filter = FilterDocument::parse(r#"{"level":"CRITICAL"}"#).unwrap();
        let cutoff = chrono::Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let filter = apply_window(filter, DEFAULT_DATE_FIELD, cutoff);

        let doc = to_bson_filter(&filter).unwrap();

        assert_eq!(doc.get_str("level").unwrap(), "CRITICAL");
        let range = doc.get_document("date").unwrap();
        assert_eq!(
            range.get_datetime("$gte").unwrap(),
            &DateTime::from_millis(1_704_067_200_000)
        );
    }

    #[test]
    fn query_operators_pass_through() {
        let filter = FilterDocument::parse(r#"{"status":{"$in":["a","b"]}}"#).unwrap();
        let doc = to_bson_filter(&filter).unwrap();
        let status = doc.get_document("status").unwrap();
        assert_eq!(status.get_array("$in").unwrap().len(), 2);
    }

    #[test]
    fn invalid_extended_json_is_rejected() {
        let filter = FilterDocument::parse(r#"{"_id":{"$oid":"not-an-object-id"}}"#).unwrap();
        assert_matches!(to_bson_filter(&filter), Err(DbError::InvalidFilter(_)));
    }
}
