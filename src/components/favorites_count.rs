use leptos::prelude::*;

use crate::context::use_app_context;
use crate::format;
use crate::store::AppStateStoreFields;

/// Header badge with the number of favorites
#[component]
pub fn FavoritesCount() -> impl IntoView {
    let store = use_app_context().store;
    let count = move || store.favorites().with(|f| f.len());

    view! {
        <span class="favorites-count">{move || format::favorites_count_label(count())}</span>
    }
}
