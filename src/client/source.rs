use super::{ApiUrl, Result};
use crate::mapper::Document;
use async_trait::async_trait;
use std::sync::Arc;

/// Anything that can answer a request URL with a parsed document
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &'static str {
        "source"
    }

    /// Fetch and parse the document behind `url`
    async fn fetch(&self, url: &ApiUrl) -> Result<Document>;
}

#[async_trait]
impl<S: DocumentSource + ?Sized> DocumentSource for Arc<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    async fn fetch(&self, url: &ApiUrl) -> Result<Document> {
        (**self).fetch(url).await
    }
}
