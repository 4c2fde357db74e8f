//! Global Application State Store
//!
//! Uses Leptos reactive_stores for field-level reactivity: list, favorites,
//! query and notice each notify only their own subscribers.

use catalog_sync::{
    ClientId, FavoritesState, ItemListCache, QueryState, SyncStore, TransientNotice,
};
use leptos::prelude::*;
use reactive_stores::Store;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Store)]
pub struct AppState {
    /// Search, sort and page
    pub query: QueryState,
    /// Item pages keyed by request
    pub list: ItemListCache,
    /// This client's favorites and in-flight toggles
    pub favorites: FavoritesState,
    /// Self-clearing error banner
    pub notice: TransientNotice,
}

impl AppState {
    pub fn new(client: ClientId) -> Self {
        Self {
            query: QueryState::new(),
            list: ItemListCache::new(),
            favorites: FavoritesState::new(client),
            notice: TransientNotice::default(),
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// The store seen through the sync flows; each update notifies the field's
/// subscribers when the write guard drops
#[derive(Clone, Copy)]
pub struct StoreSync(pub AppStore);

impl SyncStore for StoreSync {
    fn update_list<R>(&self, f: impl FnOnce(&mut ItemListCache) -> R) -> R {
        let binding = self.0.list();
        let mut list = binding.write();
        f(&mut *list)
    }

    fn update_favorites<R>(&self, f: impl FnOnce(&mut FavoritesState) -> R) -> R {
        let binding = self.0.favorites();
        let mut favorites = binding.write();
        f(&mut *favorites)
    }
}
