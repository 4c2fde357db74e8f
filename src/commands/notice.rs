//! Notice Commands

use catalog_sync::NOTICE_TTL_MS;
use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use crate::context::AppContext;
use crate::store::AppStateStoreFields;

/// Show `message` in the banner; it clears itself after [`NOTICE_TTL_MS`]
/// unless a newer message replaced it
pub fn show_notice(ctx: AppContext, message: String) {
    let store = ctx.store;
    let ticket = store.notice().write().show(message);
    let timer = Timeout::new(NOTICE_TTL_MS, move || {
        store.notice().write().expire(ticket);
    });
    ctx.set_notice_timer(Some(timer));
}

pub fn dismiss_notice(ctx: AppContext) {
    ctx.set_notice_timer(None);
    ctx.store.notice().write().dismiss();
}
