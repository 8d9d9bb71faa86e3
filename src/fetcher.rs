//! The list-endpoint seam the listing controller fetches through.

use crate::client::ResourceClient;
use crate::entities::Entity;
use crate::error::Result;
use crate::types::{ListPage, ListParams};

/// One page of `E` with its stats.
pub type EntityPage<E> = ListPage<E, <E as Entity>::Stats>;

/// Fetches one page of `E`.
///
/// Implementations make at most one request per call, never retry and never
/// mutate `params`. `params` must carry `page` and `pageSize`; anything else
/// is passed through untouched.
#[async_trait::async_trait]
pub trait DataFetcher<E: Entity>: Send + Sync {
    /// Fetches the page described by `params`.
    async fn fetch(&self, params: &ListParams) -> Result<EntityPage<E>>;
}

#[async_trait::async_trait]
impl<E: Entity> DataFetcher<E> for ResourceClient<E> {
    async fn fetch(&self, params: &ListParams) -> Result<EntityPage<E>> {
        self.list(params).await
    }
}
