use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::restaurant::entities::{Category, DEFAULT_PRICE_TIER, Restaurant};

/// One consistent aggregation of the directory.
///
/// Built in full by a single load run and never mutated afterwards; a newer
/// run replaces it as a whole.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub restaurants: Vec<Restaurant>,
    pub categories: Vec<Category>,
    pub price_tier_by_range_id: HashMap<String, String>,
    pub open_by_restaurant_id: HashMap<String, bool>,
    pub loaded_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(
        restaurants: Vec<Restaurant>,
        categories: Vec<Category>,
        price_tier_by_range_id: HashMap<String, String>,
        open_by_restaurant_id: HashMap<String, bool>,
    ) -> Self {
        Self {
            restaurants,
            categories,
            price_tier_by_range_id,
            open_by_restaurant_id,
            loaded_at: Utc::now(),
        }
    }

    /// Missing entries count as closed.
    pub fn is_open(&self, restaurant_id: &str) -> bool {
        self.open_by_restaurant_id
            .get(restaurant_id)
            .copied()
            .unwrap_or(false)
    }

    /// Missing entries resolve to [`DEFAULT_PRICE_TIER`].
    pub fn price_tier(&self, price_range_id: &str) -> &str {
        self.price_tier_by_range_id
            .get(price_range_id)
            .map(String::as_str)
            .unwrap_or(DEFAULT_PRICE_TIER)
    }
}

/// What readers of the store currently see.
#[derive(Debug, Clone, PartialEq)]
pub enum DirectoryView {
    Loading,
    Ready(Arc<Snapshot>),
    /// No snapshot was ever published and the latest run failed.
    Failed { message: String },
}

impl DirectoryView {
    pub fn snapshot(&self) -> Option<&Arc<Snapshot>> {
        match self {
            DirectoryView::Ready(snapshot) => Some(snapshot),
            _ => None,
        }
    }
}
