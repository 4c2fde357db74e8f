//! Synchronization Flows
//!
//! Async flows that move data between a [`CatalogSource`] and the list and
//! favorites state. The state sits behind [`SyncStore`] so the same flows
//! drive reactive stores in the browser and plain cells in tests.

use crate::error::{SourceResult, ToggleError};
use crate::favorites::{FavoritesState, Mutation, ToggleIntent, ToggleStart};
use crate::list_cache::ItemListCache;
use crate::models::{ClientId, Favorite, ItemId, ItemPage};
use crate::query::{ItemQuery, QueryKey, PAGE_SIZE};
use crate::source::CatalogSource;

/// Mutable access to the state the flows maintain
pub trait SyncStore {
    fn update_list<R>(&self, f: impl FnOnce(&mut ItemListCache) -> R) -> R;

    fn update_favorites<R>(&self, f: impl FnOnce(&mut FavoritesState) -> R) -> R;
}

/// Read one page for `key`, trimming the look-ahead row
pub async fn load_page<S>(source: &S, key: &QueryKey) -> SourceResult<ItemPage>
where
    S: CatalogSource + ?Sized,
{
    let query = ItemQuery::from_key(key, PAGE_SIZE);
    let rows = source.list_items(&query).await?;
    Ok(ItemPage::from_rows(rows, PAGE_SIZE))
}

/// Fetch `key` into the list cache. Returns `false` when the result was
/// superseded by a newer read of the same key.
pub async fn refresh_list<S, St>(source: &S, store: &St, key: QueryKey) -> bool
where
    S: CatalogSource + ?Sized,
    St: SyncStore,
{
    let ticket = store.update_list(|cache| cache.begin(key.clone()));
    let result = load_page(source, &key).await;
    if let Err(err) = &result {
        log::warn!("[LIST] Loading {:?} failed: {}", key, err);
    }

    let applied = store.update_list(|cache| cache.complete(ticket, result.map_err(|e| e.to_string())));
    if !applied {
        log::debug!("[LIST] Discarded superseded result for {:?}", key);
    }
    applied
}

/// Re-read the client's favorites from the source of truth
pub async fn refresh_favorites<S, St>(source: &S, client: &ClientId, store: &St) -> bool
where
    S: CatalogSource + ?Sized,
    St: SyncStore,
{
    let ticket = store.update_favorites(|state| state.begin_read());
    let result = source.list_favorites(client).await;
    if let Err(err) = &result {
        log::warn!("[FAV] Reading favorites failed: {}", err);
    }

    let applied =
        store.update_favorites(|state| state.apply_read(ticket, result.map_err(|e| e.to_string())));
    if !applied {
        log::debug!("[FAV] Ignored favorites read overtaken by a newer read or a toggle");
    }
    applied
}

/// Toggle `item` for `client`: patch optimistically, write, revert on
/// failure, and reconcile with the source after every settled write.
///
/// A toggle queued behind an in-flight one for the same item returns at once;
/// the call driving the in-flight write sends it and reports its failure.
pub async fn toggle_favorite<S, St>(
    source: &S,
    client: &ClientId,
    store: &St,
    item: ItemId,
) -> Result<(), ToggleError>
where
    S: CatalogSource + ?Sized,
    St: SyncStore,
{
    let mut mutation = match store.update_favorites(|state| state.begin_toggle(item)) {
        ToggleStart::Send(mutation) => mutation,
        ToggleStart::Queued(mutation) => {
            log::debug!("[FAV] {:?} of item {} queued", mutation.intent, item);
            return Ok(());
        }
    };

    let mut failure = None;
    loop {
        let result = send_toggle(source, client, &mutation).await;
        let settlement = store.update_favorites(|state| state.settle(&mutation, result.is_ok()));

        if let Err(err) = result {
            log::warn!("[FAV] {:?} of item {} failed: {}", mutation.intent, item, err);
            if settlement.dropped > 0 {
                log::debug!("[FAV] Dropped {} queued toggles of item {}", settlement.dropped, item);
            }
            failure = Some(ToggleError::Write { item, source: err });
        }

        refresh_favorites(source, client, store).await;

        match settlement.next {
            Some(next) => mutation = next,
            None => break,
        }
    }

    match failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

async fn send_toggle<S>(source: &S, client: &ClientId, mutation: &Mutation) -> SourceResult<()>
where
    S: CatalogSource + ?Sized,
{
    match mutation.intent {
        ToggleIntent::Add => {
            source
                .add_favorite(&Favorite::new(client.clone(), mutation.item))
                .await
        }
        ToggleIntent::Remove => source.remove_favorite(client, mutation.item).await,
    }
}
