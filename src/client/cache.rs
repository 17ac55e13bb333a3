use super::ApiUrl;
use crate::config::CacheSettings;
use crate::mapper::Document;
use moka::future::Cache;
use std::sync::Arc;

/// Response cache keyed by request URL.
///
/// Documents are cached before population, so every type built from the same
/// response shares one entry.
#[derive(Clone)]
pub struct DocumentCache {
    documents: Cache<String, Arc<Document>>,
}

impl DocumentCache {
    /// Create a new cache with default settings
    pub fn new() -> Self {
        Self::with_config(&CacheSettings::default())
    }

    /// Create a new cache with custom configuration
    pub fn with_config(config: &CacheSettings) -> Self {
        let documents = Cache::builder()
            .max_capacity(config.max_entries)
            .time_to_live(config.ttl())
            .build();

        Self { documents }
    }

    /// Get a cached document
    pub async fn get(&self, url: &ApiUrl) -> Option<Arc<Document>> {
        self.documents.get(&url.cache_key()).await
    }

    /// Cache a document
    pub async fn insert(&self, url: &ApiUrl, document: Arc<Document>) {
        self.documents.insert(url.cache_key(), document).await;
    }

    /// Clear all entries
    pub fn clear(&self) {
        self.documents.invalidate_all();
    }

    /// Get cache statistics
    pub async fn stats(&self) -> CacheStats {
        self.documents.run_pending_tasks().await;
        CacheStats {
            entries: self.documents.entry_count(),
        }
    }
}

impl Default for DocumentCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DocumentCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentCache")
            .field("entries", &self.documents.entry_count())
            .finish()
    }
}

/// Cache statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_after_insert() {
        let cache = DocumentCache::new();
        let url = ApiUrl::new("movie").segment(78);
        let document = Arc::new(Document::parse(r#"{"id": 78}"#).unwrap());

        assert!(cache.get(&url).await.is_none());
        cache.insert(&url, Arc::clone(&document)).await;

        assert_eq!(cache.get(&url).await, Some(document));
        assert_eq!(cache.stats().await.entries, 1);
    }

    #[tokio::test]
    async fn test_params_are_part_of_the_key() {
        let cache = DocumentCache::new();
        let english = ApiUrl::new("movie").segment(78).param("language", "en");
        let german = ApiUrl::new("movie").segment(78).param("language", "de");

        cache
            .insert(&english, Arc::new(Document::parse(r#"{"title": "Blade Runner"}"#).unwrap()))
            .await;

        assert!(cache.get(&english).await.is_some());
        assert!(cache.get(&german).await.is_none());
    }

    #[tokio::test]
    async fn test_clear() {
        let cache = DocumentCache::with_config(&CacheSettings {
            enabled: true,
            max_entries: 10,
            ttl_secs: 60,
        });
        let url = ApiUrl::new("configuration");

        cache.insert(&url, Arc::new(Document::default())).await;
        cache.clear();

        assert!(cache.get(&url).await.is_none());
        assert_eq!(cache.stats().await.entries, 0);
    }
}
