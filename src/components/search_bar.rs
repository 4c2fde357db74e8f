//! Search Bar Component
//!
//! Title search box. Keystrokes show immediately; the filter applies after
//! typing pauses.

use leptos::prelude::*;

use crate::commands;
use crate::context::use_app_context;
use crate::store::AppStateStoreFields;

#[component]
pub fn SearchBar() -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;
    let search_input = move || store.query().with(|q| q.search_input().to_string());

    view! {
        <div class="search-bar">
            <input
                type="text"
                class="search-input"
                placeholder="Search by title..."
                prop:value=search_input
                on:input=move |ev| commands::input_search(ctx, event_target_value(&ev))
            />
            <Show when=move || !search_input().is_empty()>
                <button
                    type="button"
                    class="search-clear"
                    title="Clear search"
                    on:click=move |_| commands::clear_search(ctx)
                >
                    "×"
                </button>
            </Show>
        </div>
    }
}
