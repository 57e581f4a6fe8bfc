use async_trait::async_trait;
use saklolo_types::{Post, SortMode};

use super::ApiResult;
use crate::report::DraftReport;

/// Remote operations the feed depends on.
///
/// `ApiClient` is the production implementation; tests substitute a
/// recording fake.
#[async_trait]
pub trait PostService: Send + Sync {
    /// Feed in newest-first order
    async fn list_posts(&self) -> ApiResult<Vec<Post>>;

    /// Feed ordered by popularity
    async fn list_popular_posts(&self) -> ApiResult<Vec<Post>>;

    /// Publish a validated help request
    async fn create_post(&self, draft: DraftReport) -> ApiResult<Post>;

    /// Fetch the collection that backs the given sort mode
    async fn fetch_feed(&self, sort: SortMode) -> ApiResult<Vec<Post>> {
        match sort {
            SortMode::Popular => self.list_popular_posts().await,
            SortMode::Latest => self.list_posts().await,
        }
    }
}
