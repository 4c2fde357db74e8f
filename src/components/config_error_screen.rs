//! Config Error Component
//!
//! Shown instead of the app when startup configuration is unusable.

use leptos::prelude::*;

#[component]
pub fn ConfigErrorScreen(message: String) -> impl IntoView {
    view! {
        <div class="config-error">
            <h1>"Catalog is not configured"</h1>
            <p class="error">{message}</p>
            <p class="hint">
                "Set CATALOG_SERVICE_URL, CATALOG_SERVICE_KEY and CATALOG_CLIENT_ID when building."
            </p>
        </div>
    }
}
