//! Pager Component
//!
//! Previous/next controls. Both stay disabled while a page is loading.

use leptos::prelude::*;

use crate::commands;
use crate::context::use_app_context;
use crate::format;
use crate::store::AppStateStoreFields;

#[component]
pub fn PagerControls() -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;
    let page = move || store.query().with(|q| q.page());
    let pager = Memo::new(move |_| {
        let page = page();
        store.list().with(|list| list.pager(page))
    });

    view! {
        <nav class="pager">
            <button
                type="button"
                class="pager-btn"
                disabled=move || !pager.get().can_prev
                on:click=move |_| commands::prev_page(ctx)
            >
                "Previous"
            </button>
            <span class="page-number">{move || format::page_label(page())}</span>
            <button
                type="button"
                class="pager-btn"
                disabled=move || !pager.get().can_next
                on:click=move |_| commands::next_page(ctx)
            >
                "Next"
            </button>
        </nav>
    }
}
