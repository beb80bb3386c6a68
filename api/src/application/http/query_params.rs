use std::str::FromStr;

use dinedex_core::domain::listing::value_objects::FilterSelection;

/// Filter dimension addressed by a query key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionKey {
    Category,     // category=1 or categories=1,2
    DeliveryTime, // delivery=under10 or delivery_time=under10
    PriceTier,    // price=$ or price_tier=$
}

impl FromStr for SelectionKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "category" | "categories" => Ok(SelectionKey::Category),
            "delivery" | "delivery_time" | "delivery_times" => Ok(SelectionKey::DeliveryTime),
            "price" | "price_tier" | "price_tiers" => Ok(SelectionKey::PriceTier),
            _ => Err(()),
        }
    }
}

/// Builds a [`FilterSelection`] from decoded query pairs.
///
/// Handles formats like:
/// - category=1&category=2 (repeated keys)
/// - category=1,2 (comma separated)
/// - price=$&delivery=under10
///
/// Unknown keys and blank values are ignored.
pub fn selection_from_pairs(pairs: &[(String, String)]) -> FilterSelection {
    let mut selection = FilterSelection::new();

    for (key, value) in pairs {
        let Ok(dimension) = key.parse::<SelectionKey>() else {
            continue;
        };

        let values = value
            .split(',')
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        match dimension {
            SelectionKey::Category => selection.categories.extend(values),
            SelectionKey::DeliveryTime => selection.delivery_times.extend(values),
            SelectionKey::PriceTier => selection.price_tiers.extend(values),
        }
    }

    selection
}
