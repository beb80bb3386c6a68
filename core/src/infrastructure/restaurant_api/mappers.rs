use serde::Deserialize;

use crate::domain::restaurant::entities::{Category, PriceRange, Restaurant};

#[derive(Debug, Deserialize)]
pub(crate) struct RestaurantsEnvelope {
    pub restaurants: Vec<RestaurantRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FiltersEnvelope {
    pub filters: Vec<FilterRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RestaurantRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub filter_ids: Vec<String>,
    #[serde(default)]
    pub image_url: String,
    pub delivery_time_minutes: u32,
    pub price_range_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FilterRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image_url: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PriceRangeRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub range: Option<String>,
}

/// `is_open` is kept loose so a non-boolean value reads as closed instead of
/// failing the whole payload.
#[derive(Debug, Deserialize)]
pub(crate) struct OpenStatusRecord {
    #[serde(default)]
    pub is_open: Option<serde_json::Value>,
}

impl From<RestaurantRecord> for Restaurant {
    fn from(record: RestaurantRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            rating: record.rating,
            filter_ids: record.filter_ids,
            image_url: record.image_url,
            delivery_time_minutes: record.delivery_time_minutes,
            price_range_id: record.price_range_id,
        }
    }
}

impl From<FilterRecord> for Category {
    fn from(record: FilterRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            image_url: record.image_url,
        }
    }
}

impl PriceRangeRecord {
    /// `None` when the range is missing or blank.
    pub fn into_price_range(self, requested_id: &str) -> Option<PriceRange> {
        let range = self.range.filter(|range| !range.trim().is_empty())?;
        Some(PriceRange {
            id: self.id.unwrap_or_else(|| requested_id.to_string()),
            range,
        })
    }
}

impl OpenStatusRecord {
    pub fn is_open(&self) -> bool {
        matches!(self.is_open, Some(serde_json::Value::Bool(true)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restaurant_record_defaults() {
        let record: RestaurantRecord = serde_json::from_str(
            r#"{"id":"1","name":"Pizza Place","delivery_time_minutes":25,"price_range_id":"2"}"#,
        )
        .unwrap();
        let restaurant = Restaurant::from(record);
        assert!(restaurant.filter_ids.is_empty());
        assert_eq!(restaurant.rating, None);
        assert_eq!(restaurant.image_url, "");
    }

    #[test]
    fn test_price_range_record_blank_range() {
        let record: PriceRangeRecord = serde_json::from_str(r#"{"id":"1","range":""}"#).unwrap();
        assert!(record.into_price_range("1").is_none());

        let record: PriceRangeRecord = serde_json::from_str(r#"{"id":"1"}"#).unwrap();
        assert!(record.into_price_range("1").is_none());
    }

    #[test]
    fn test_price_range_record_uses_requested_id() {
        let record: PriceRangeRecord = serde_json::from_str(r#"{"range":"$$$"}"#).unwrap();
        let price_range = record.into_price_range("7").unwrap();
        assert_eq!(price_range.id, "7");
        assert_eq!(price_range.range, "$$$");
    }

    #[test]
    fn test_open_status_record_requires_boolean() {
        let open: OpenStatusRecord =
            serde_json::from_str(r#"{"restaurant_id":"1","is_open":true}"#).unwrap();
        assert!(open.is_open());

        let text: OpenStatusRecord =
            serde_json::from_str(r#"{"restaurant_id":"1","is_open":"true"}"#).unwrap();
        assert!(!text.is_open());

        let missing: OpenStatusRecord = serde_json::from_str(r#"{"restaurant_id":"1"}"#).unwrap();
        assert!(!missing.is_open());
    }
}
