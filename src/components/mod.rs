//! UI Components
//!
//! Leptos components for the catalog page.

mod config_error_screen;
mod favorites_count;
mod item_list;
mod item_row;
mod notice_banner;
mod pager_controls;
mod search_bar;
mod sort_controls;

pub use config_error_screen::ConfigErrorScreen;
pub use favorites_count::FavoritesCount;
pub use item_list::ItemList;
pub use item_row::ItemRow;
pub use notice_banner::NoticeBanner;
pub use pager_controls::PagerControls;
pub use search_bar::SearchBar;
pub use sort_controls::SortControls;
