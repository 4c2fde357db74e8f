//! Query Commands
//!
//! Search, sort and paging. Each effective change moves the query key,
//! which the app turns into a page load.

use catalog_sync::{SortField, SEARCH_DEBOUNCE_MS};
use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use crate::context::AppContext;
use crate::store::AppStateStoreFields;

// ========================
// Search
// ========================

/// Record a keystroke; the search applies once typing pauses
pub fn input_search(ctx: AppContext, text: String) {
    let store = ctx.store;
    let ticket = store.query().write().input_search(text);
    let timer = Timeout::new(SEARCH_DEBOUNCE_MS, move || {
        if store.query().write().settle_search(ticket) {
            log::debug!("[QUERY] Search applied: {:?}", store.query().with(|q| q.search().to_string()));
        }
    });
    ctx.set_search_timer(Some(timer));
}

/// Clear the box and the filter at once, dropping any pending keystroke
pub fn clear_search(ctx: AppContext) {
    ctx.set_search_timer(None);
    ctx.store.query().write().clear_search();
}

// ========================
// Sort
// ========================

pub fn set_sort_field(ctx: AppContext, field: SortField) {
    ctx.store.query().write().set_sort_field(field);
}

pub fn toggle_sort_order(ctx: AppContext) {
    ctx.store.query().write().toggle_sort_order();
}

// ========================
// Paging
// ========================

pub fn next_page(ctx: AppContext) {
    ctx.store.query().write().next_page();
}

pub fn prev_page(ctx: AppContext) {
    ctx.store.query().write().prev_page();
}
