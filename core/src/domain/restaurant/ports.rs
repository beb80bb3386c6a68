use std::future::Future;
use std::sync::Arc;

use crate::domain::{
    common::entities::app_errors::CoreError,
    listing::value_objects::{Facets, FilterSelection, ListedRestaurant},
    restaurant::entities::{Category, GatewayError, PriceRange, Restaurant},
    snapshot::entities::{DirectoryView, Snapshot},
};

/// Remote source of restaurant data.
///
/// The collection fetches are foundational and surface a [`GatewayError`].
/// The per-entity lookups are called once per restaurant (or price range) and
/// degrade to `None` / `false` instead of failing.
#[cfg_attr(test, mockall::automock)]
pub trait RestaurantGateway: Send + Sync {
    fn fetch_restaurants(
        &self,
    ) -> impl Future<Output = Result<Vec<Restaurant>, GatewayError>> + Send;

    fn fetch_filters(&self) -> impl Future<Output = Result<Vec<Category>, GatewayError>> + Send;

    fn fetch_price_range(
        &self,
        price_range_id: String,
    ) -> impl Future<Output = Option<PriceRange>> + Send;

    fn fetch_open_status(&self, restaurant_id: String) -> impl Future<Output = bool> + Send;
}

pub trait DirectoryService: Send + Sync {
    /// Runs one aggregation and publishes it unless a newer run was started
    /// in the meantime.
    fn load_snapshot(&self) -> impl Future<Output = Result<Arc<Snapshot>, CoreError>> + Send;

    fn view(&self) -> DirectoryView;

    fn last_error(&self) -> Option<String>;

    fn list_restaurants(
        &self,
        selection: &FilterSelection,
    ) -> Result<(Arc<Snapshot>, Vec<ListedRestaurant>), CoreError>;

    fn facets(&self) -> Result<Facets, CoreError>;
}
