//! Data Source Layer
//!
//! The boundary against the hosted data service. The REST implementation
//! talks to the real service; the in-memory one backs the tests.

#[cfg(test)]
mod memory;
mod rest;

use async_trait::async_trait;

use crate::error::SourceResult;
use crate::models::{ClientId, Favorite, Item, ItemId};
use crate::query::ItemQuery;

#[cfg(test)]
pub use memory::{MemorySource, SourceCall};
pub use rest::{RestRequest, RestSource};

/// Reads and writes against the item and favorite tables.
///
/// Futures are not `Send`: everything runs on the browser event loop.
#[async_trait(?Send)]
pub trait CatalogSource {
    /// One page of items plus the look-ahead row
    async fn list_items(&self, query: &ItemQuery) -> SourceResult<Vec<Item>>;

    /// Every favorite of `client`
    async fn list_favorites(&self, client: &ClientId) -> SourceResult<Vec<Favorite>>;

    async fn add_favorite(&self, favorite: &Favorite) -> SourceResult<()>;

    async fn remove_favorite(&self, client: &ClientId, item: ItemId) -> SourceResult<()>;
}
