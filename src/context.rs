//! Application Context
//!
//! Shared handles provided via Leptos Context API. The client identity is
//! fixed at startup and handed to every flow explicitly.

use catalog_sync::{ClientId, RestSource};
use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use crate::store::{AppStore, StoreSync};

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Reactive application state
    pub store: AppStore,
    /// Identity of this client
    client: StoredValue<ClientId>,
    /// Data service access
    source: StoredValue<RestSource, LocalStorage>,
    /// Pending search debounce; replacing it cancels the old timer
    search_timer: StoredValue<Option<Timeout>, LocalStorage>,
    /// Pending notice expiry; replacing it cancels the old timer
    notice_timer: StoredValue<Option<Timeout>, LocalStorage>,
}

impl AppContext {
    pub fn new(store: AppStore, client: ClientId, source: RestSource) -> Self {
        Self {
            store,
            client: StoredValue::new(client),
            source: StoredValue::new_local(source),
            search_timer: StoredValue::new_local(None),
            notice_timer: StoredValue::new_local(None),
        }
    }

    pub fn client(&self) -> ClientId {
        self.client.get_value()
    }

    pub fn source(&self) -> RestSource {
        self.source.get_value()
    }

    pub fn sync_store(&self) -> StoreSync {
        StoreSync(self.store)
    }

    /// Arm the search debounce timer, dropping (and so cancelling) the previous one
    pub fn set_search_timer(&self, timer: Option<Timeout>) {
        self.search_timer.set_value(timer);
    }

    /// Arm the notice expiry timer, dropping (and so cancelling) the previous one
    pub fn set_notice_timer(&self, timer: Option<Timeout>) {
        self.notice_timer.set_value(timer);
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
