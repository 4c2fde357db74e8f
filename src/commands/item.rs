//! Item Commands
//!
//! Page loads for the item list.

use catalog_sync::QueryKey;
use leptos::task::spawn_local;

use crate::context::AppContext;

/// Fetch the page for `key` into the list cache
pub fn load_items(ctx: AppContext, key: QueryKey) {
    spawn_local(async move {
        let source = ctx.source();
        catalog_sync::refresh_list(&source, &ctx.sync_store(), key).await;
    });
}
