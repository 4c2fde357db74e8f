//! Favorites Synchronization State
//!
//! The current client's favorite set, patched optimistically, plus one toggle
//! state machine per item:
//!
//! ```text
//! idle ──toggle──▶ pending(snapshot) ──ok──▶ idle, or the next queued toggle
//!                                    └─err─▶ idle, snapshot restored, queue dropped
//! ```
//!
//! Toggles of one item are serialized. A toggle issued while another is in
//! flight for the same item is applied to the set at once and queued; the task
//! driving the in-flight write sends it next. Toggles of different items are
//! independent.
//!
//! Every reconciliation read overwrites the set with the service's answer,
//! except for items whose toggles are still pending, which keep their latest
//! optimistic value. Reads are numbered in issue order: a read is ignored when
//! a later one was already applied or when a toggle started after it was
//! issued.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::models::{ClientId, Favorite, ItemId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MutationId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleIntent {
    Add,
    Remove,
}

impl ToggleIntent {
    /// Favorite state this toggle moves the item to
    pub fn target(self) -> bool {
        matches!(self, ToggleIntent::Add)
    }
}

/// One toggle of one item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation {
    pub id: MutationId,
    pub item: ItemId,
    pub intent: ToggleIntent,
    /// Favorite state right before this toggle was applied
    pub snapshot: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleStart {
    /// Nothing in flight for the item: the caller sends this write now
    Send(Mutation),
    /// Waiting behind the in-flight toggle of the same item
    Queued(Mutation),
}

/// Outcome of settling the in-flight toggle of an item
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Settlement {
    /// The optimistic patch was undone
    pub reverted: bool,
    /// Queued toggles discarded along with the revert
    pub dropped: usize,
    /// Queued toggle that is now in flight and must be sent
    pub next: Option<Mutation>,
}

/// Issue order of a favorites read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadTicket(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoritesStatus {
    Loading,
    Ready,
    /// No read has succeeded yet and the latest one failed
    Failed(String),
    /// The set is from an earlier read; the latest one failed
    Stale(String),
}

#[derive(Debug, Clone)]
struct ItemQueue {
    active: Mutation,
    queued: VecDeque<Mutation>,
}

impl ItemQueue {
    fn latest_target(&self) -> bool {
        self.queued.back().unwrap_or(&self.active).intent.target()
    }
}

#[derive(Debug, Clone)]
pub struct FavoritesState {
    client: ClientId,
    favorites: BTreeSet<ItemId>,
    loaded: bool,
    read_error: Option<String>,
    issued_reads: u64,
    last_applied_read: u64,
    min_valid_read: u64,
    next_mutation: u64,
    mutations: BTreeMap<ItemId, ItemQueue>,
}

impl FavoritesState {
    pub fn new(client: ClientId) -> Self {
        Self {
            client,
            favorites: BTreeSet::new(),
            loaded: false,
            read_error: None,
            issued_reads: 0,
            last_applied_read: 0,
            min_valid_read: 0,
            next_mutation: 0,
            mutations: BTreeMap::new(),
        }
    }

    pub fn client(&self) -> &ClientId {
        &self.client
    }

    pub fn is_favorite(&self, item: ItemId) -> bool {
        self.favorites.contains(&item)
    }

    /// A toggle for `item` is in flight
    pub fn is_busy(&self, item: ItemId) -> bool {
        self.mutations.contains_key(&item)
    }

    pub fn len(&self) -> usize {
        self.favorites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty()
    }

    pub fn items(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.favorites.iter().copied()
    }

    /// After a failed read the last reconciled set is kept, flagged stale
    /// until a read succeeds again
    pub fn status(&self) -> FavoritesStatus {
        match (&self.read_error, self.loaded) {
            (None, true) => FavoritesStatus::Ready,
            (Some(message), true) => FavoritesStatus::Stale(message.clone()),
            (Some(message), false) => FavoritesStatus::Failed(message.clone()),
            (None, false) => FavoritesStatus::Loading,
        }
    }

    /// Apply a toggle optimistically and say whether to send it now
    pub fn begin_toggle(&mut self, item: ItemId) -> ToggleStart {
        // Reads issued before this point may predate the patch below.
        self.min_valid_read = self.issued_reads + 1;
        self.next_mutation += 1;

        let snapshot = self.favorites.contains(&item);
        let intent = if snapshot {
            ToggleIntent::Remove
        } else {
            ToggleIntent::Add
        };
        self.patch(item, intent.target());

        let mutation = Mutation {
            id: MutationId(self.next_mutation),
            item,
            intent,
            snapshot,
        };
        match self.mutations.get_mut(&item) {
            Some(queue) => {
                queue.queued.push_back(mutation.clone());
                ToggleStart::Queued(mutation)
            }
            None => {
                self.mutations.insert(
                    item,
                    ItemQueue {
                        active: mutation.clone(),
                        queued: VecDeque::new(),
                    },
                );
                ToggleStart::Send(mutation)
            }
        }
    }

    /// Settle the in-flight toggle. On failure the item goes back to the
    /// state it had before that toggle and queued toggles are discarded, since
    /// they were relative to the optimistic state.
    pub fn settle(&mut self, mutation: &Mutation, succeeded: bool) -> Settlement {
        let Some(queue) = self.mutations.get_mut(&mutation.item) else {
            return Settlement::default();
        };
        if queue.active.id != mutation.id {
            return Settlement::default();
        }

        if succeeded {
            match queue.queued.pop_front() {
                Some(next) => {
                    queue.active = next.clone();
                    Settlement {
                        next: Some(next),
                        ..Settlement::default()
                    }
                }
                None => {
                    self.mutations.remove(&mutation.item);
                    Settlement::default()
                }
            }
        } else {
            let dropped = queue.queued.len();
            self.mutations.remove(&mutation.item);
            self.patch(mutation.item, mutation.snapshot);
            Settlement {
                reverted: true,
                dropped,
                next: None,
            }
        }
    }

    pub fn begin_read(&mut self) -> ReadTicket {
        self.issued_reads += 1;
        ReadTicket(self.issued_reads)
    }

    /// Reconcile with a read. Returns `false` when the result is ignored: a
    /// later read was already applied, or a toggle started after this read
    /// was issued.
    pub fn apply_read(&mut self, ticket: ReadTicket, result: Result<Vec<Favorite>, String>) -> bool {
        let ReadTicket(seq) = ticket;
        if seq <= self.last_applied_read || seq < self.min_valid_read {
            return false;
        }
        self.last_applied_read = seq;

        match result {
            Ok(rows) => {
                let mut favorites: BTreeSet<ItemId> = rows
                    .into_iter()
                    .filter(|row| row.client_id == self.client)
                    .map(|row| row.item_id)
                    .collect();
                for (item, queue) in &self.mutations {
                    if queue.latest_target() {
                        favorites.insert(*item);
                    } else {
                        favorites.remove(item);
                    }
                }
                self.favorites = favorites;
                self.loaded = true;
                self.read_error = None;
            }
            Err(message) => self.read_error = Some(message),
        }
        true
    }

    fn patch(&mut self, item: ItemId, favorite: bool) {
        if favorite {
            self.favorites.insert(item);
        } else {
            self.favorites.remove(&item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ClientId {
        ClientId::new("client-1")
    }

    fn loaded_with(ids: &[i64]) -> FavoritesState {
        let mut state = FavoritesState::new(client());
        let rows = ids
            .iter()
            .map(|id| Favorite::new(client(), ItemId(*id)))
            .collect();
        let ticket = state.begin_read();
        assert!(state.apply_read(ticket, Ok(rows)));
        state
    }

    fn expect_send(start: ToggleStart) -> Mutation {
        match start {
            ToggleStart::Send(mutation) => mutation,
            other => panic!("expected Send, got {:?}", other),
        }
    }

    #[test]
    fn test_initial_status() {
        let mut state = FavoritesState::new(client());
        assert_eq!(state.status(), FavoritesStatus::Loading);

        let ticket = state.begin_read();
        state.apply_read(ticket, Err("offline".to_string()));
        assert_eq!(state.status(), FavoritesStatus::Failed("offline".to_string()));

        let ticket = state.begin_read();
        state.apply_read(ticket, Ok(vec![]));
        assert_eq!(state.status(), FavoritesStatus::Ready);
    }

    #[test]
    fn test_reconcile_failure_keeps_last_set_and_is_reported() {
        let mut state = loaded_with(&[1, 2]);
        let ticket = state.begin_read();
        assert!(state.apply_read(ticket, Err("offline".to_string())));
        assert_eq!(state.status(), FavoritesStatus::Stale("offline".to_string()));
        assert_eq!(state.items().collect::<Vec<_>>(), vec![ItemId(1), ItemId(2)]);

        let ticket = state.begin_read();
        assert!(state.apply_read(ticket, Ok(vec![Favorite::new(client(), ItemId(1))])));
        assert_eq!(state.status(), FavoritesStatus::Ready);
        assert_eq!(state.items().collect::<Vec<_>>(), vec![ItemId(1)]);
    }

    #[test]
    fn test_toggle_on_is_optimistic() {
        let mut state = loaded_with(&[]);
        let mutation = expect_send(state.begin_toggle(ItemId(42)));

        assert_eq!(mutation.intent, ToggleIntent::Add);
        assert!(!mutation.snapshot);
        assert!(state.is_favorite(ItemId(42)));
        assert!(state.is_busy(ItemId(42)));

        let settlement = state.settle(&mutation, true);
        assert_eq!(settlement, Settlement::default());
        assert!(state.is_favorite(ItemId(42)));
        assert!(!state.is_busy(ItemId(42)));
    }

    #[test]
    fn test_failed_toggle_on_restores_previous_set() {
        let mut state = loaded_with(&[1]);
        let before: Vec<ItemId> = state.items().collect();

        let mutation = expect_send(state.begin_toggle(ItemId(42)));
        assert!(state.is_favorite(ItemId(42)));

        let settlement = state.settle(&mutation, false);
        assert!(settlement.reverted);
        assert_eq!(state.items().collect::<Vec<_>>(), before);
        assert!(!state.is_busy(ItemId(42)));
    }

    #[test]
    fn test_failed_toggle_off_restores_favorite() {
        let mut state = loaded_with(&[7]);
        let mutation = expect_send(state.begin_toggle(ItemId(7)));
        assert_eq!(mutation.intent, ToggleIntent::Remove);
        assert!(!state.is_favorite(ItemId(7)));

        state.settle(&mutation, false);
        assert!(state.is_favorite(ItemId(7)));
    }

    #[test]
    fn test_double_toggle_is_serialized() {
        let mut state = loaded_with(&[]);
        let first = expect_send(state.begin_toggle(ItemId(5)));
        let second = match state.begin_toggle(ItemId(5)) {
            ToggleStart::Queued(mutation) => mutation,
            other => panic!("expected Queued, got {:?}", other),
        };

        // Optimistic state reflects both clicks right away.
        assert!(!state.is_favorite(ItemId(5)));
        assert_eq!(second.intent, ToggleIntent::Remove);

        let settlement = state.settle(&first, true);
        assert_eq!(settlement.next.as_ref(), Some(&second));
        assert!(state.is_busy(ItemId(5)));

        let settlement = state.settle(&second, true);
        assert_eq!(settlement.next, None);
        assert!(!state.is_busy(ItemId(5)));
        assert!(!state.is_favorite(ItemId(5)));
    }

    #[test]
    fn test_failure_drops_queued_toggles() {
        let mut state = loaded_with(&[]);
        let first = expect_send(state.begin_toggle(ItemId(5)));
        state.begin_toggle(ItemId(5));
        state.begin_toggle(ItemId(5));
        assert!(state.is_favorite(ItemId(5)));

        let settlement = state.settle(&first, false);
        assert!(settlement.reverted);
        assert_eq!(settlement.dropped, 2);
        assert!(!state.is_favorite(ItemId(5)));
        assert!(!state.is_busy(ItemId(5)));
    }

    #[test]
    fn test_settling_unknown_mutation_is_a_no_op() {
        let mut state = loaded_with(&[]);
        let first = expect_send(state.begin_toggle(ItemId(5)));
        state.settle(&first, true);
        assert_eq!(state.settle(&first, false), Settlement::default());
        assert!(state.is_favorite(ItemId(5)));
    }

    #[test]
    fn test_toggles_of_different_items_are_independent() {
        let mut state = loaded_with(&[]);
        let a = expect_send(state.begin_toggle(ItemId(1)));
        let b = expect_send(state.begin_toggle(ItemId(2)));

        state.settle(&a, false);
        assert!(!state.is_favorite(ItemId(1)));
        assert!(state.is_favorite(ItemId(2)));
        assert!(state.is_busy(ItemId(2)));

        state.settle(&b, true);
        assert!(state.is_favorite(ItemId(2)));
    }

    #[test]
    fn test_read_issued_before_toggle_is_ignored() {
        let mut state = loaded_with(&[]);
        let stale = state.begin_read();
        state.begin_toggle(ItemId(3));

        assert!(!state.apply_read(stale, Ok(vec![])));
        assert!(state.is_favorite(ItemId(3)));
    }

    #[test]
    fn test_older_read_arriving_last_is_ignored() {
        let mut state = loaded_with(&[]);
        let a = expect_send(state.begin_toggle(ItemId(1)));
        let b = expect_send(state.begin_toggle(ItemId(2)));

        state.settle(&a, true);
        let after_a = state.begin_read();
        state.settle(&b, true);
        let after_b = state.begin_read();

        let both = vec![
            Favorite::new(client(), ItemId(1)),
            Favorite::new(client(), ItemId(2)),
        ];
        assert!(state.apply_read(after_b, Ok(both)));
        // Answered before item 2 was written, delivered last.
        assert!(!state.apply_read(after_a, Ok(vec![Favorite::new(client(), ItemId(1))])));

        assert!(state.is_favorite(ItemId(1)));
        assert!(state.is_favorite(ItemId(2)));
    }

    #[test]
    fn test_read_keeps_pending_toggles_applied() {
        let mut state = loaded_with(&[1]);
        let pending = expect_send(state.begin_toggle(ItemId(9)));
        let ticket = state.begin_read();

        // The service does not know about item 9 yet, and item 2 was
        // favorited elsewhere.
        let rows = vec![
            Favorite::new(client(), ItemId(1)),
            Favorite::new(client(), ItemId(2)),
        ];
        assert!(state.apply_read(ticket, Ok(rows)));
        assert_eq!(
            state.items().collect::<Vec<_>>(),
            vec![ItemId(1), ItemId(2), ItemId(9)]
        );

        state.settle(&pending, true);
        let ticket = state.begin_read();
        state.apply_read(ticket, Ok(vec![Favorite::new(client(), ItemId(1))]));
        assert_eq!(state.items().collect::<Vec<_>>(), vec![ItemId(1)]);
    }

    #[test]
    fn test_rows_of_other_clients_are_ignored() {
        let mut state = FavoritesState::new(client());
        let ticket = state.begin_read();
        state.apply_read(
            ticket,
            Ok(vec![
                Favorite::new(client(), ItemId(1)),
                Favorite::new(ClientId::new("someone-else"), ItemId(2)),
            ]),
        );
        assert_eq!(state.len(), 1);
        assert!(!state.is_favorite(ItemId(2)));
    }
}
