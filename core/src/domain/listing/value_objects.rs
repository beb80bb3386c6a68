use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::restaurant::entities::Category;

/// A named delivery-time range. Bounds are inclusive; a missing bound is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct DeliveryTimeBucket {
    pub id: &'static str,
    pub label: &'static str,
    pub min: Option<u32>,
    pub max: Option<u32>,
}

pub const DELIVERY_TIME_BUCKETS: [DeliveryTimeBucket; 4] = [
    DeliveryTimeBucket {
        id: "under10",
        label: "0-10 min",
        min: None,
        max: Some(10),
    },
    DeliveryTimeBucket {
        id: "10to30",
        label: "10-30 min",
        min: Some(10),
        max: Some(30),
    },
    DeliveryTimeBucket {
        id: "30to60",
        label: "30-60 min",
        min: Some(30),
        max: Some(60),
    },
    DeliveryTimeBucket {
        id: "over60",
        label: "1 hour+",
        min: Some(60),
        max: None,
    },
];

impl DeliveryTimeBucket {
    pub fn find(id: &str) -> Option<&'static DeliveryTimeBucket> {
        DELIVERY_TIME_BUCKETS.iter().find(|bucket| bucket.id == id)
    }

    pub fn contains(&self, minutes: u32) -> bool {
        self.min.is_none_or(|min| minutes >= min) && self.max.is_none_or(|max| minutes <= max)
    }
}

/// The user's current choice in each filter dimension. An empty set leaves
/// that dimension unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FilterSelection {
    pub categories: BTreeSet<String>,
    pub delivery_times: BTreeSet<String>,
    pub price_tiers: BTreeSet<String>,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.delivery_times.is_empty() && self.price_tiers.is_empty()
    }

    pub fn with_categories<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn with_delivery_times<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.delivery_times.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn with_price_tiers<I, S>(mut self, tiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.price_tiers.extend(tiers.into_iter().map(Into::into));
        self
    }

    /// Selects the category if absent, deselects it otherwise.
    pub fn toggle_category(&mut self, id: &str) {
        toggle(&mut self.categories, id);
    }

    pub fn toggle_delivery_time(&mut self, id: &str) {
        toggle(&mut self.delivery_times, id);
    }

    pub fn toggle_price_tier(&mut self, tier: &str) {
        toggle(&mut self.price_tiers, tier);
    }

    pub fn clear_categories(&mut self) {
        self.categories.clear();
    }

    pub fn clear_delivery_times(&mut self) {
        self.delivery_times.clear();
    }

    pub fn clear_price_tiers(&mut self) {
        self.price_tiers.clear();
    }
}

fn toggle(set: &mut BTreeSet<String>, value: &str) {
    if !set.remove(value) {
        set.insert(value.to_string());
    }
}

/// A restaurant row with every referenced attribute already resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ListedRestaurant {
    pub id: String,
    pub name: String,
    pub rating: Option<f64>,
    pub category_ids: Vec<String>,
    pub delivery_time_minutes: u32,
    pub price_tier: String,
    pub is_open: bool,
    pub image_url: String,
}

/// Options available to the filter menus for the current snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Facets {
    pub categories: Vec<Category>,
    pub delivery_times: Vec<DeliveryTimeBucket>,
    pub price_tiers: Vec<String>,
    pub loaded_at: DateTime<Utc>,
}
