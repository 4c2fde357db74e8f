//! Catalog Sync
//!
//! Synchronization layer behind the catalog front-end. Framework independent:
//! - query: search/sort/page state and the request it derives
//! - list_cache: item pages cached under their request key
//! - favorites: the client's favorite set and per-item toggle state machine
//! - source: data-source boundary (REST service; in-memory for tests)
//! - sync: async flows tying a source to the state above

mod config;
mod error;
mod favorites;
mod list_cache;
mod models;
mod query;
mod source;
mod sync;
mod timing;

pub use config::{AppConfig, CLIENT_ID_VAR, SERVICE_KEY_VAR, SERVICE_URL_VAR};
pub use error::{ConfigError, SourceError, SourceResult, ToggleError};
pub use favorites::{
    FavoritesState, FavoritesStatus, Mutation, MutationId, ReadTicket, Settlement, ToggleIntent,
    ToggleStart,
};
pub use list_cache::{FetchTicket, ItemListCache, ListView, Pager};
pub use models::{ClientId, Favorite, Item, ItemId, ItemPage, RATING_MAX};
pub use query::{
    ilike_pattern, ItemQuery, QueryKey, QueryState, RowRange, SortField, SortOrder, PAGE_SIZE,
    SEARCH_DEBOUNCE_MS,
};
pub use source::{CatalogSource, RestRequest, RestSource};
pub use sync::{load_page, refresh_favorites, refresh_list, toggle_favorite, SyncStore};
pub use timing::{Debouncer, Ticket, TransientNotice, NOTICE_TTL_MS};
