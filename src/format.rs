//! Display Formatting
//!
//! Text shown by the components, kept free of reactive code so it can be
//! checked directly.

use catalog_sync::{SortOrder, RATING_MAX};
use chrono::{DateTime, Utc};

pub const LOADING_TEXT: &str = "Loading";
pub const READ_ERROR_TEXT: &str = "An error occurred while fetching data";
pub const EMPTY_TEXT: &str = "No items to be shown";
pub const REFRESHING_TEXT: &str = "Refreshing…";
pub const STALE_FAVORITES_TEXT: &str =
    "An error occurred while fetching favorites; showing the last known state";

pub fn favorite_label(is_favorite: bool) -> &'static str {
    if is_favorite {
        "Added to favorites"
    } else {
        "Add to favorites"
    }
}

pub fn rating_label(rating: f64) -> String {
    format!("{:.1} / {}", rating, RATING_MAX)
}

pub fn updated_label(updated_at: &DateTime<Utc>) -> String {
    format!("Updated {}", updated_at.format("%Y-%m-%d"))
}

pub fn sort_order_label(order: SortOrder) -> &'static str {
    match order {
        SortOrder::Ascending => "↑ Ascending",
        SortOrder::Descending => "↓ Descending",
    }
}

pub fn page_label(page: u32) -> String {
    format!("Page {}", page)
}

pub fn favorites_count_label(count: usize) -> String {
    match count {
        1 => "1 favorite".to_string(),
        n => format!("{} favorites", n),
    }
}
