//! Item Row Component
//!
//! One catalog entry with its favorite toggle.

use catalog_sync::Item;
use leptos::prelude::*;

use crate::commands;
use crate::context::use_app_context;
use crate::format;
use crate::store::AppStateStoreFields;

#[component]
pub fn ItemRow(item: Item) -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;
    let id = item.id;
    let is_favorite = move || store.favorites().with(|f| f.is_favorite(id));
    // Disabled until the write settles
    let is_busy = move || store.favorites().with(|f| f.is_busy(id));

    view! {
        <li class="item-row">
            <div class="item-main">
                <span class="item-title">{item.title.clone()}</span>
                <span class="item-category">{item.category.clone()}</span>
            </div>
            <div class="item-meta">
                <span class="item-rating">{format::rating_label(item.display_rating())}</span>
                <span class="item-updated">{format::updated_label(&item.updated_at)}</span>
            </div>
            <button
                type="button"
                class=move || if is_favorite() { "favorite-btn active" } else { "favorite-btn" }
                disabled=is_busy
                on:click=move |_| commands::toggle_favorite(ctx, id)
            >
                {move || format::favorite_label(is_favorite())}
            </button>
        </li>
    }
}
