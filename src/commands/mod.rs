//! UI Command Handlers
//!
//! Bridges UI events to the catalog-sync flows, organized by domain.
//! Everything here is fire-and-forget: results land in the store.

mod favorite;
mod item;
mod notice;
mod query;

// Re-export all public items
pub use favorite::*;
pub use item::*;
pub use notice::*;
pub use query::*;
