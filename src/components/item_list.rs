//! Item List Component
//!
//! Renders the current page, or the loading, error and empty states. The
//! previous page stays on screen while the next one loads, and a failed
//! favorites refresh is flagged above the last known state.

use catalog_sync::{FavoritesStatus, ListView};
use leptos::prelude::*;

use super::ItemRow;
use crate::context::use_app_context;
use crate::format;
use crate::store::AppStateStoreFields;

#[component]
pub fn ItemList() -> impl IntoView {
    let store = use_app_context().store;
    let list_view = Memo::new(move |_| store.list().with(|list| list.view()));
    let favorites_status = Memo::new(move |_| store.favorites().with(|f| f.status()));

    view! {
        <section class="item-list">
            {move || {
                // Rows need the favorites set to render their toggles
                let stale = match favorites_status.get() {
                    FavoritesStatus::Failed(reason) => {
                        return view! {
                            <p class="error">{format::READ_ERROR_TEXT}</p>
                            <p class="error-detail">{reason}</p>
                        }.into_any();
                    }
                    FavoritesStatus::Loading => {
                        return view! { <p class="loading">{format::LOADING_TEXT}</p> }.into_any();
                    }
                    FavoritesStatus::Stale(reason) => Some(reason),
                    FavoritesStatus::Ready => None,
                };
                let stale_banner = stale.map(|reason| view! {
                    <div class="error stale-favorites" role="alert">
                        <span>{format::STALE_FAVORITES_TEXT}</span>
                        <span class="error-detail">{reason}</span>
                    </div>
                });

                let content = match list_view.get() {
                    ListView::Loading => {
                        view! { <p class="loading">{format::LOADING_TEXT}</p> }.into_any()
                    }
                    ListView::Failed(reason) => view! {
                        <p class="error">{format::READ_ERROR_TEXT}</p>
                        <p class="error-detail">{reason}</p>
                    }.into_any(),
                    ListView::Ready { page, .. } if page.items.is_empty() => {
                        view! { <p class="empty">{format::EMPTY_TEXT}</p> }.into_any()
                    }
                    ListView::Ready { page, refreshing } => view! {
                        <Show when=move || refreshing>
                            <p class="refreshing">{format::REFRESHING_TEXT}</p>
                        </Show>
                        <ul class="items">
                            {page.items.into_iter()
                                .map(|item| view! { <ItemRow item=item /> })
                                .collect_view()}
                        </ul>
                    }.into_any(),
                };

                view! { {stale_banner} {content} }.into_any()
            }}
        </section>
    }
}
