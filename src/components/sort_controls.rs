//! Sort Controls Component
//!
//! Sort field buttons plus an order toggle.

use catalog_sync::SortField;
use leptos::prelude::*;

use crate::commands;
use crate::context::use_app_context;
use crate::format;
use crate::store::AppStateStoreFields;

#[component]
pub fn SortControls() -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;
    let sort_field = move || store.query().with(|q| q.sort_field());
    let sort_order = move || store.query().with(|q| q.sort_order());

    view! {
        <div class="sort-controls">
            <span class="sort-label">"Sort by"</span>
            {SortField::ALL.iter().map(move |field| {
                let field = *field;
                view! {
                    <button
                        type="button"
                        class=move || if sort_field() == field { "sort-btn active" } else { "sort-btn" }
                        on:click=move |_| commands::set_sort_field(ctx, field)
                    >
                        {field.label()}
                    </button>
                }
            }).collect_view()}
            <button
                type="button"
                class="sort-order-btn"
                on:click=move |_| commands::toggle_sort_order(ctx)
            >
                {move || format::sort_order_label(sort_order())}
            </button>
        </div>
    }
}
