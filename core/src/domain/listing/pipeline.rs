//! Filter and ordering pipeline over a published [`Snapshot`].
//!
//! A restaurant is kept when it passes every dimension; inside a dimension any
//! selected value is enough. The result lists open restaurants first and keeps
//! snapshot order within the open and closed groups.

use std::collections::BTreeSet;

use crate::domain::{
    common::resolve_image_url,
    listing::value_objects::{
        DELIVERY_TIME_BUCKETS, DeliveryTimeBucket, Facets, FilterSelection, ListedRestaurant,
    },
    restaurant::entities::Restaurant,
    snapshot::entities::Snapshot,
};

pub fn matches_category(restaurant: &Restaurant, selected: &BTreeSet<String>) -> bool {
    selected.is_empty() || restaurant.in_any_category(selected)
}

/// Unknown bucket ids never match.
pub fn matches_delivery_time(restaurant: &Restaurant, selected: &BTreeSet<String>) -> bool {
    selected.is_empty()
        || selected
            .iter()
            .filter_map(|id| DeliveryTimeBucket::find(id))
            .any(|bucket| bucket.contains(restaurant.delivery_time_minutes))
}

pub fn matches_price_tier(
    snapshot: &Snapshot,
    restaurant: &Restaurant,
    selected: &BTreeSet<String>,
) -> bool {
    selected.is_empty() || selected.contains(snapshot.price_tier(&restaurant.price_range_id))
}

pub fn apply<'a>(snapshot: &'a Snapshot, selection: &FilterSelection) -> Vec<&'a Restaurant> {
    let (mut open, closed): (Vec<_>, Vec<_>) = snapshot
        .restaurants
        .iter()
        .filter(|restaurant| matches_category(restaurant, &selection.categories))
        .filter(|restaurant| matches_delivery_time(restaurant, &selection.delivery_times))
        .filter(|restaurant| matches_price_tier(snapshot, restaurant, &selection.price_tiers))
        .partition(|restaurant| snapshot.is_open(&restaurant.id));

    open.extend(closed);
    open
}

/// Runs [`apply`] and resolves each row for display.
pub fn render(
    snapshot: &Snapshot,
    selection: &FilterSelection,
    asset_origin: &str,
) -> Vec<ListedRestaurant> {
    apply(snapshot, selection)
        .into_iter()
        .map(|restaurant| ListedRestaurant {
            id: restaurant.id.clone(),
            name: restaurant.name.clone(),
            rating: restaurant.rating,
            category_ids: restaurant.filter_ids.clone(),
            delivery_time_minutes: restaurant.delivery_time_minutes,
            price_tier: snapshot.price_tier(&restaurant.price_range_id).to_string(),
            is_open: snapshot.is_open(&restaurant.id),
            image_url: resolve_image_url(asset_origin, &restaurant.image_url),
        })
        .collect()
}

/// Distinct price tiers, shortest first.
pub fn price_tiers(snapshot: &Snapshot) -> Vec<String> {
    let distinct: BTreeSet<&str> = snapshot
        .price_tier_by_range_id
        .values()
        .map(String::as_str)
        .collect();

    let mut tiers: Vec<String> = distinct.into_iter().map(str::to_string).collect();
    tiers.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
    tiers
}

pub fn facets(snapshot: &Snapshot) -> Facets {
    Facets {
        categories: snapshot.categories.clone(),
        delivery_times: DELIVERY_TIME_BUCKETS.to_vec(),
        price_tiers: price_tiers(snapshot),
        loaded_at: snapshot.loaded_at,
    }
}
