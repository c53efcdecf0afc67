use crate::model::FetchError;

/// One outbound request to the vendor page per call; `Some(query)` posts it as a search.
#[async_trait::async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, query: Option<&str>) -> Result<String, FetchError>;
}
