//! Where the pipeline's JSON documents come from.

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;
use watchtonight_core::ContentError;

pub const MOVIES_DOCUMENT: &str = "movies.json";
pub const SEASONS_DOCUMENT: &str = "tv_seasons.json";

/// A source of raw content documents.
#[async_trait::async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch and parse one document, e.g. `movies.json`.
    async fn fetch_json(&self, name: &str) -> Result<Value, ContentError>;
}

/// Fetches documents with a plain GET under a base URL.
///
/// No retries and no timeout: a hung request blocks the caller.
pub struct HttpContentSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpContentSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn document_url(&self, name: &str) -> String {
        format!("{}/{}", self.base_url, name.trim_start_matches('/'))
    }
}

#[async_trait::async_trait]
impl ContentSource for HttpContentSource {
    async fn fetch_json(&self, name: &str) -> Result<Value, ContentError> {
        let url = self.document_url(name);
        debug!(url = %url, "content request");

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ContentError::Fetch(format!("{name}: {e}")))?;

        if !resp.status().is_success() {
            return Err(ContentError::Fetch(format!(
                "{name}: server returned {}",
                resp.status()
            )));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| ContentError::Fetch(format!("{name}: {e}")))?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// In-memory documents keyed by name. A missing name fails like a 404.
#[derive(Debug, Default, Clone)]
pub struct StaticContentSource {
    documents: HashMap<String, Value>,
}

impl StaticContentSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, name: &str, document: Value) -> Self {
        self.documents.insert(name.to_string(), document);
        self
    }
}

#[async_trait::async_trait]
impl ContentSource for StaticContentSource {
    async fn fetch_json(&self, name: &str) -> Result<Value, ContentError> {
        self.documents
            .get(name)
            .cloned()
            .ok_or_else(|| ContentError::Fetch(format!("{name}: not found")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn document_url_joins_without_double_slash() {
        let source = HttpContentSource::new("http://localhost:5173/content/");
        assert_eq!(
            source.document_url("movies.json"),
            "http://localhost:5173/content/movies.json"
        );
        assert_eq!(
            source.document_url("/tv_seasons.json"),
            "http://localhost:5173/content/tv_seasons.json"
        );
    }

    #[tokio::test]
    async fn static_source_serves_and_misses() {
        let source = StaticContentSource::new().with_document(MOVIES_DOCUMENT, json!({ "movies": [] }));
        assert!(source.fetch_json(MOVIES_DOCUMENT).await.is_ok());
        let err = source.fetch_json(SEASONS_DOCUMENT).await.unwrap_err();
        assert!(matches!(err, ContentError::Fetch(_)));
        assert!(err.to_string().starts_with("unable to load data"));
    }
}
