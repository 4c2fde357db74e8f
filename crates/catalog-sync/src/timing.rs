//! Timer Bookkeeping
//!
//! Generation tickets for delay-based effects. The caller owns the real timer
//! (and cancels the previous one when scheduling a new one); these types
//! decide whether a timer that fires still counts.

/// Lifetime of a transient error notice, in milliseconds
pub const NOTICE_TTL_MS: u32 = 3000;

/// Identifies one scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

/// Holds the latest input until it has been stable for the settle delay
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    generation: u64,
    pending: Option<T>,
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self {
            generation: 0,
            pending: None,
        }
    }
}

impl<T> Debouncer<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new input; every earlier ticket stops counting
    pub fn push(&mut self, value: T) -> Ticket {
        self.generation += 1;
        self.pending = Some(value);
        Ticket(self.generation)
    }

    /// Release the pending value if `ticket` belongs to the latest input
    pub fn fire(&mut self, ticket: Ticket) -> Option<T> {
        if ticket.0 == self.generation {
            self.pending.take()
        } else {
            None
        }
    }

    pub fn cancel(&mut self) {
        self.generation += 1;
        self.pending = None;
    }

    #[cfg(test)]
    fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// A self-clearing message; a newer message replaces the old one and restarts
/// its clock
#[derive(Debug, Clone, Default)]
pub struct TransientNotice {
    generation: u64,
    message: Option<String>,
}

impl TransientNotice {
    pub fn show(&mut self, message: impl Into<String>) -> Ticket {
        self.generation += 1;
        self.message = Some(message.into());
        Ticket(self.generation)
    }

    /// Clear the message if `ticket` is the one that showed it
    pub fn expire(&mut self, ticket: Ticket) -> bool {
        if ticket.0 == self.generation && self.message.is_some() {
            self.message = None;
            true
        } else {
            false
        }
    }

    pub fn dismiss(&mut self) {
        self.generation += 1;
        self.message = None;
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}
