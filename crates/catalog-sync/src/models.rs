//! Catalog Models
//!
//! Rows of the hosted `items` and `favorites` tables, plus the client identity.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Upper bound of the rating scale
pub const RATING_MAX: f64 = 5.0;

/// Item identifier as stored by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ItemId(pub i64);

// The service returns bigint ids as numbers, but text-typed foreign keys come
// back as strings.
impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Int(id) => Ok(ItemId(id)),
            Raw::Text(text) => text
                .trim()
                .parse()
                .map(ItemId)
                .map_err(serde::de::Error::custom),
        }
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Token identifying this browser client, fixed for the process lifetime
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(String);

impl ClientId {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Catalog item (read-only from the client)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub category: String,
    pub rating: f64,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Rating clamped to the displayable scale
    pub fn display_rating(&self) -> f64 {
        if self.rating.is_nan() {
            return 0.0;
        }
        self.rating.clamp(0.0, RATING_MAX)
    }
}

/// "This client marked this item as favorite"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite {
    pub item_id: ItemId,
    pub client_id: ClientId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Favorite {
    pub fn new(client_id: ClientId, item_id: ItemId) -> Self {
        Self {
            item_id,
            client_id,
            created_at: None,
        }
    }
}

/// One rendered page of items
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemPage {
    pub items: Vec<Item>,
    pub has_next_page: bool,
}

impl ItemPage {
    /// Build a page from a look-ahead read: rows past `page_size` only signal
    /// that another page exists and are dropped.
    pub fn from_rows(mut rows: Vec<Item>, page_size: usize) -> Self {
        let has_next_page = rows.len() > page_size;
        rows.truncate(page_size);
        Self {
            items: rows,
            has_next_page,
        }
    }
}
