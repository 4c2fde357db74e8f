//! In-Memory Data Source
//!
//! Holds items and favorites in cells and records every call. Reads and
//! writes can be made to fail to exercise the error paths.

use std::cell::{Cell, RefCell};
use std::cmp::Ordering;

use async_trait::async_trait;

use super::CatalogSource;
use crate::error::{SourceError, SourceResult};
use crate::models::{ClientId, Favorite, Item, ItemId};
use crate::query::{ItemQuery, SortField, SortOrder};

/// A call received by [`MemorySource`], in arrival order
#[derive(Debug, Clone, PartialEq)]
pub enum SourceCall {
    ListItems(ItemQuery),
    ListFavorites,
    AddFavorite(ItemId),
    RemoveFavorite(ItemId),
}

#[derive(Debug, Default)]
pub struct MemorySource {
    items: RefCell<Vec<Item>>,
    favorites: RefCell<Vec<Favorite>>,
    fail_reads: Cell<bool>,
    fail_writes: Cell<bool>,
    calls: RefCell<Vec<SourceCall>>,
}

impl MemorySource {
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            items: RefCell::new(items),
            ..Self::default()
        }
    }

    pub fn with_favorites(self, favorites: Vec<Favorite>) -> Self {
        *self.favorites.borrow_mut() = favorites;
        self
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    pub fn calls(&self) -> Vec<SourceCall> {
        self.calls.borrow().clone()
    }

    /// Write calls only, in order
    pub fn writes(&self) -> Vec<SourceCall> {
        self.calls
            .borrow()
            .iter()
            .filter(|call| matches!(call, SourceCall::AddFavorite(_) | SourceCall::RemoveFavorite(_)))
            .cloned()
            .collect()
    }

    pub fn favorites(&self) -> Vec<Favorite> {
        self.favorites.borrow().clone()
    }

    fn record(&self, call: SourceCall) {
        self.calls.borrow_mut().push(call);
    }

    fn check(&self, flag: &Cell<bool>, what: &str) -> SourceResult<()> {
        if flag.get() {
            Err(SourceError::Unavailable(format!("{} rejected", what)))
        } else {
            Ok(())
        }
    }
}

fn compare(a: &Item, b: &Item, field: SortField) -> Ordering {
    match field {
        SortField::Rating => a.rating.partial_cmp(&b.rating).unwrap_or(Ordering::Equal),
        SortField::Title => a.title.cmp(&b.title),
    }
}

#[async_trait(?Send)]
impl CatalogSource for MemorySource {
    async fn list_items(&self, query: &ItemQuery) -> SourceResult<Vec<Item>> {
        self.record(SourceCall::ListItems(query.clone()));
        self.check(&self.fail_reads, "read")?;

        let needle = query.title_contains.as_ref().map(|text| text.to_lowercase());
        let mut rows: Vec<Item> = self
            .items
            .borrow()
            .iter()
            .filter(|item| {
                needle
                    .as_ref()
                    .map_or(true, |needle| item.title.to_lowercase().contains(needle))
            })
            .cloned()
            .collect();

        rows.sort_by(|a, b| {
            let ordering = compare(a, b, query.sort_field);
            match query.sort_order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        });

        Ok(rows
            .into_iter()
            .skip(query.range.start)
            .take(query.range.len())
            .collect())
    }

    async fn list_favorites(&self, client: &ClientId) -> SourceResult<Vec<Favorite>> {
        self.record(SourceCall::ListFavorites);
        self.check(&self.fail_reads, "read")?;

        Ok(self
            .favorites
            .borrow()
            .iter()
            .filter(|fav| &fav.client_id == client)
            .cloned()
            .collect())
    }

    async fn add_favorite(&self, favorite: &Favorite) -> SourceResult<()> {
        self.record(SourceCall::AddFavorite(favorite.item_id));
        self.check(&self.fail_writes, "write")?;

        let mut favorites = self.favorites.borrow_mut();
        // Mirrors the service's unique (client_id, item_id) constraint.
        if favorites
            .iter()
            .any(|fav| fav.item_id == favorite.item_id && fav.client_id == favorite.client_id)
        {
            return Err(SourceError::Status {
                status: 409,
                body: "duplicate key value violates unique constraint".to_string(),
            });
        }
        favorites.push(favorite.clone());
        Ok(())
    }

    async fn remove_favorite(&self, client: &ClientId, item: ItemId) -> SourceResult<()> {
        self.record(SourceCall::RemoveFavorite(item));
        self.check(&self.fail_writes, "write")?;

        self.favorites
            .borrow_mut()
            .retain(|fav| !(fav.item_id == item && &fav.client_id == client));
        Ok(())
    }
}
