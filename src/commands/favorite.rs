//! Favorite Commands
//!
//! Favorites read and optimistic toggles for the current client.

use catalog_sync::ItemId;
use leptos::task::spawn_local;

use super::show_notice;
use crate::context::AppContext;

/// Read this client's favorites and reconcile the local set
pub fn load_favorites(ctx: AppContext) {
    spawn_local(async move {
        let source = ctx.source();
        let client = ctx.client();
        catalog_sync::refresh_favorites(&source, &client, &ctx.sync_store()).await;
    });
}

/// Flip the favorite mark on `item`; a failed write reverts and raises a notice
pub fn toggle_favorite(ctx: AppContext, item: ItemId) {
    spawn_local(async move {
        let source = ctx.source();
        let client = ctx.client();
        let result = catalog_sync::toggle_favorite(&source, &client, &ctx.sync_store(), item).await;
        if let Err(err) = result {
            show_notice(ctx, err.to_string());
        }
    });
}
