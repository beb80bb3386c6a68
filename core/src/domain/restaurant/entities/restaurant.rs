use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub rating: Option<f64>,
    /// Category ids this restaurant is listed under.
    pub filter_ids: Vec<String>,
    /// Path relative to the API's asset origin.
    pub image_url: String,
    pub delivery_time_minutes: u32,
    pub price_range_id: String,
}

impl Restaurant {
    pub fn in_any_category<'a, I>(&self, category_ids: I) -> bool
    where
        I: IntoIterator<Item = &'a String>,
    {
        category_ids
            .into_iter()
            .any(|category_id| self.filter_ids.contains(category_id))
    }
}
