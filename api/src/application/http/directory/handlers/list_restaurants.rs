use axum::extract::State;
use chrono::{DateTime, Utc};
use dinedex_core::domain::{
    listing::value_objects::{FilterSelection, ListedRestaurant},
    restaurant::ports::DirectoryService,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::{
    query_extractor::SelectionExtractor,
    server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ListRestaurantsResponse {
    pub restaurants: Vec<ListedRestaurant>,
    pub selection: FilterSelection,
    pub loaded_at: DateTime<Utc>,
}

#[utoipa::path(
    get,
    path = "/restaurants",
    tag = "directory",
    summary = "List restaurants",
    description = "Filter the current snapshot by category, delivery time and price tier. Values may repeat or be comma separated. Open restaurants are listed first.",
    params(
        ("category" = Option<String>, Query, description = "Category ids"),
        ("delivery" = Option<String>, Query, description = "Delivery time bucket ids"),
        ("price" = Option<String>, Query, description = "Price tiers, e.g. $$"),
    ),
    responses(
        (status = 200, body = ListRestaurantsResponse),
        (status = 502, description = "First snapshot load failed"),
        (status = 503, description = "Snapshot still loading")
    )
)]
pub async fn list_restaurants(
    State(state): State<AppState>,
    SelectionExtractor(selection): SelectionExtractor,
) -> Result<Response<ListRestaurantsResponse>, ApiError> {
    let (snapshot, restaurants) = state
        .service
        .list_restaurants(&selection)
        .map_err(ApiError::from)?;

    Ok(Response::OK(ListRestaurantsResponse {
        restaurants,
        selection,
        loaded_at: snapshot.loaded_at,
    }))
}
