//! Query Parameter Derivation
//!
//! Search, sort and page state behind the item list, and the deterministic
//! item request it maps to.

use crate::timing::{Debouncer, Ticket};

/// Items rendered per page
pub const PAGE_SIZE: usize = 10;

/// Settle delay before typed search text takes effect, in milliseconds
pub const SEARCH_DEBOUNCE_MS: u32 = 300;

/// Sortable column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortField {
    #[default]
    Rating,
    Title,
}

impl SortField {
    pub const ALL: [SortField; 2] = [SortField::Rating, SortField::Title];

    /// Column name on the service
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Rating => "rating",
            SortField::Title => "title",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortField::Rating => "Rating",
            SortField::Title => "Title",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

/// Identity of one item read. Results are cached and written back under it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub search: String,
    pub sort_field: SortField,
    pub sort_order: SortOrder,
    pub page: u32,
}

/// Inclusive row range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRange {
    pub start: usize,
    pub end: usize,
}

impl RowRange {
    /// Rows for a 1-based `page`, plus one look-ahead row past the full page
    pub fn for_page(page: u32, page_size: usize) -> Self {
        let page = page.max(1) as usize;
        Self {
            start: (page - 1) * page_size,
            end: page * page_size,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }
}

/// Request descriptor for one page of items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemQuery {
    /// Case-insensitive substring on the title; `None` means no filter
    pub title_contains: Option<String>,
    pub sort_field: SortField,
    pub sort_order: SortOrder,
    pub range: RowRange,
}

impl ItemQuery {
    pub fn from_key(key: &QueryKey, page_size: usize) -> Self {
        let search = key.search.trim();
        Self {
            title_contains: (!search.is_empty()).then(|| search.to_string()),
            sort_field: key.sort_field,
            sort_order: key.sort_order,
            range: RowRange::for_page(key.page, page_size),
        }
    }
}

/// `ILIKE` pattern matching `text` anywhere, with LIKE metacharacters escaped
pub fn ilike_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Search, sort and page state.
///
/// The page goes back to 1 whenever the effective search, the sort field or
/// the sort order changes; otherwise it only moves through
/// [`next_page`](Self::next_page) and [`prev_page`](Self::prev_page).
#[derive(Debug, Clone)]
pub struct QueryState {
    search_input: String,
    search: String,
    sort_field: SortField,
    sort_order: SortOrder,
    page: u32,
    debounce: Debouncer<String>,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search_input: String::new(),
            search: String::new(),
            sort_field: SortField::default(),
            sort_order: SortOrder::default(),
            page: 1,
            debounce: Debouncer::new(),
        }
    }
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text as typed
    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    /// Text the list is currently filtered by
    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort_field(&self) -> SortField {
        self.sort_field
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn key(&self) -> QueryKey {
        QueryKey {
            search: self.search.clone(),
            sort_field: self.sort_field,
            sort_order: self.sort_order,
            page: self.page,
        }
    }

    /// Record a keystroke. Hand the ticket back to
    /// [`settle_search`](Self::settle_search) once [`SEARCH_DEBOUNCE_MS`] elapse.
    pub fn input_search(&mut self, text: impl Into<String>) -> Ticket {
        let text = text.into();
        self.search_input = text.clone();
        self.debounce.push(text)
    }

    /// Promote the typed text if `ticket` is still the latest keystroke.
    /// Returns whether the effective search changed.
    pub fn settle_search(&mut self, ticket: Ticket) -> bool {
        match self.debounce.fire(ticket) {
            Some(text) => self.apply_search(text),
            None => false,
        }
    }

    /// Drop the typed text and any pending keystroke, effective immediately
    pub fn clear_search(&mut self) -> bool {
        self.search_input.clear();
        self.debounce.cancel();
        self.apply_search(String::new())
    }

    pub fn set_sort_field(&mut self, field: SortField) -> bool {
        if self.sort_field == field {
            return false;
        }
        self.sort_field = field;
        self.page = 1;
        true
    }

    pub fn set_sort_order(&mut self, order: SortOrder) -> bool {
        if self.sort_order == order {
            return false;
        }
        self.sort_order = order;
        self.page = 1;
        true
    }

    pub fn toggle_sort_order(&mut self) {
        let order = self.sort_order.toggled();
        self.set_sort_order(order);
    }

    pub fn next_page(&mut self) {
        self.page = self.page.saturating_add(1);
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    fn apply_search(&mut self, text: String) -> bool {
        let text = text.trim().to_string();
        if self.search == text {
            return false;
        }
        self.search = text;
        self.page = 1;
        true
    }
}
