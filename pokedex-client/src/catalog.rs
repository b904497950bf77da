//! Abstract catalog interface.
//!
//! Defines the calls the store issues against the catalog.

use crate::error::ClientResult;
use crate::resources::{DetailResource, FormResource, PageResource, SpeciesResource};
use async_trait::async_trait;

/// Abstract catalog interface.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Returns a short name for the catalog backend (for logging).
    fn provider_name(&self) -> &'static str;

    /// Lists one page of records.
    ///
    /// Without a cursor, returns the first `page_size` records. With a
    /// cursor, the cursor is fetched as-is and `page_size` is ignored.
    async fn list_page(
        &self,
        page_size: usize,
        cursor: Option<&str>,
    ) -> ClientResult<PageResource>;

    /// Looks a record up by its catalog name.
    ///
    /// Returns [`ClientError::NotFound`](crate::ClientError::NotFound) when
    /// the catalog has no such record.
    async fn find_by_name(&self, name: &str) -> ClientResult<DetailResource>;

    /// Fetches a detail resource by its locator URL.
    async fn fetch_detail(&self, locator: &str) -> ClientResult<DetailResource>;

    /// Fetches a visual-form resource by its locator URL.
    async fn fetch_form(&self, locator: &str) -> ClientResult<FormResource>;

    /// Fetches the species description resource for a record name.
    async fn fetch_description(&self, name: &str) -> ClientResult<SpeciesResource>;
}
