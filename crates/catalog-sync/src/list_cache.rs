//! Item List Cache
//!
//! Item pages cached under the [`QueryKey`] that requested them. A result is
//! always written back under its own key, so a late answer for an old key can
//! never overwrite what is shown for the current one. While the current key
//! loads, the previously displayed page stays visible (stale-while-revalidate).

use std::collections::HashMap;

use crate::models::ItemPage;
use crate::query::QueryKey;

#[derive(Debug, Clone, Default)]
struct Entry {
    page: Option<ItemPage>,
    error: Option<String>,
    in_flight: Option<u64>,
}

/// Handle for one issued read; hand it back to [`ItemListCache::complete`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    key: QueryKey,
    request: u64,
}

impl FetchTicket {
    pub fn key(&self) -> &QueryKey {
        &self.key
    }
}

/// What the list area should show
#[derive(Debug, Clone, PartialEq)]
pub enum ListView {
    /// First load for this key, nothing to fall back on
    Loading,
    /// The latest read for the current key failed
    Failed(String),
    /// Data to render; `refreshing` when it is being revalidated or belongs to
    /// the previous key
    Ready { page: ItemPage, refreshing: bool },
}

/// Enablement of the previous/next controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pager {
    pub can_prev: bool,
    pub can_next: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ItemListCache {
    entries: HashMap<QueryKey, Entry>,
    current: Option<QueryKey>,
    previous: Option<QueryKey>,
    next_request: u64,
}

impl ItemListCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `key` current and mark a read for it as in flight. Cached data
    /// for the key, if any, stays visible until the read completes.
    pub fn begin(&mut self, key: QueryKey) -> FetchTicket {
        if self.current.as_ref() != Some(&key) {
            if let Some(old) = self.current.take() {
                // Only a key that actually had something on screen can serve
                // as the stale fallback.
                if self.has_page(&old) {
                    self.previous = Some(old);
                }
            }
            self.current = Some(key.clone());
            self.prune();
        }

        self.next_request += 1;
        let request = self.next_request;
        self.entries.entry(key.clone()).or_default().in_flight = Some(request);
        FetchTicket { key, request }
    }

    /// Store a result under its originating key. Returns `false` when a newer
    /// read for the same key superseded this one.
    pub fn complete(&mut self, ticket: FetchTicket, result: Result<ItemPage, String>) -> bool {
        let Some(entry) = self.entries.get_mut(&ticket.key) else {
            return false;
        };
        if entry.in_flight != Some(ticket.request) {
            return false;
        }

        entry.in_flight = None;
        match result {
            Ok(page) => {
                entry.page = Some(page);
                entry.error = None;
            }
            Err(message) => entry.error = Some(message),
        }
        true
    }

    pub fn current_key(&self) -> Option<&QueryKey> {
        self.current.as_ref()
    }

    /// Whether a read for the current key is outstanding
    pub fn is_fetching(&self) -> bool {
        self.current_entry()
            .map_or(false, |entry| entry.in_flight.is_some())
    }

    pub fn view(&self) -> ListView {
        let Some(entry) = self.current_entry() else {
            return ListView::Loading;
        };

        if entry.in_flight.is_none() {
            if let Some(message) = &entry.error {
                return ListView::Failed(message.clone());
            }
        }

        match (&entry.page, entry.in_flight) {
            (Some(page), in_flight) => ListView::Ready {
                page: page.clone(),
                refreshing: in_flight.is_some(),
            },
            (None, Some(_)) => match self.previous_page() {
                Some(page) => ListView::Ready {
                    page: page.clone(),
                    refreshing: true,
                },
                None => ListView::Loading,
            },
            (None, None) => ListView::Loading,
        }
    }

    /// Pagination controls for the current `page`: both disabled while a read
    /// is in flight, next only when the latest read reported another page
    pub fn pager(&self, page: u32) -> Pager {
        if self.is_fetching() {
            return Pager::default();
        }
        let has_next = self
            .current_entry()
            .and_then(|entry| entry.page.as_ref())
            .map_or(false, |page| page.has_next_page);
        Pager {
            can_prev: page > 1,
            can_next: has_next,
        }
    }

    /// Keep the current and previous keys, plus reads still in flight so
    /// their results can land; everything else is dropped
    fn prune(&mut self) {
        let current = self.current.as_ref();
        let previous = self.previous.as_ref();
        self.entries.retain(|key, entry| {
            Some(key) == current || Some(key) == previous || entry.in_flight.is_some()
        });
    }

    fn current_entry(&self) -> Option<&Entry> {
        self.current.as_ref().and_then(|key| self.entries.get(key))
    }

    fn previous_page(&self) -> Option<&ItemPage> {
        self.previous
            .as_ref()
            .and_then(|key| self.entries.get(key))
            .and_then(|entry| entry.page.as_ref())
    }

    fn has_page(&self, key: &QueryKey) -> bool {
        self.entries
            .get(key)
            .map_or(false, |entry| entry.page.is_some())
    }
}
