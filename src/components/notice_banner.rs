//! Notice Banner Component
//!
//! Transient error banner for failed favorite updates.

use leptos::prelude::*;

use crate::commands;
use crate::context::use_app_context;
use crate::store::AppStateStoreFields;

#[component]
pub fn NoticeBanner() -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;
    let message = move || store.notice().with(|n| n.message().map(str::to_string));

    view! {
        {move || message().map(|text| view! {
            <div class="notice-banner" role="alert">
                <span class="notice-text">{text}</span>
                <button
                    type="button"
                    class="notice-dismiss"
                    on:click=move |_| commands::dismiss_notice(ctx)
                >
                    "×"
                </button>
            </div>
        })}
    }
}
