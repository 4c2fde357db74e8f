//! Catalog Frontend App
//!
//! Main application component: header, toolbar, list and pager.

use std::sync::Arc;

use catalog_sync::{AppConfig, RestSource};
use leptos::prelude::*;
use reactive_stores::Store;

use crate::commands;
use crate::components::{
    FavoritesCount, ItemList, NoticeBanner, PagerControls, SearchBar, SortControls,
};
use crate::context::AppContext;
use crate::store::{AppState, AppStateStoreFields};

#[component]
pub fn App(config: Arc<AppConfig>) -> impl IntoView {
    let client = config.client_id().clone();
    let store = Store::new(AppState::new(client.clone()));
    let ctx = AppContext::new(store, client, RestSource::new(config));

    // Provide context to all children
    provide_context(ctx);

    // Keystrokes that do not settle leave the key, and so the list, alone
    let query_key = Memo::new(move |_| store.query().with(|q| q.key()));

    // Load items when the key changes
    Effect::new(move |_| {
        let key = query_key.get();
        log::debug!("[APP] Loading items for {:?}", key);
        commands::load_items(ctx, key);
    });

    // Favorites depend on the client only: load once on mount
    Effect::new(move |_| {
        commands::load_favorites(ctx);
    });

    view! {
        <div class="app-layout">
            <header class="catalog-header">
                <h1>"Catalog"</h1>
                <FavoritesCount />
            </header>
            <div class="toolbar">
                <SearchBar />
                <SortControls />
            </div>
            <NoticeBanner />
            <main class="main-content">
                <ItemList />
            </main>
            <PagerControls />
        </div>
    }
}
