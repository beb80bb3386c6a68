use axum::extract::State;
use dinedex_core::domain::{listing::value_objects::Facets, restaurant::ports::DirectoryService};

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[utoipa::path(
    get,
    path = "/facets",
    tag = "directory",
    summary = "Get filter options",
    description = "Categories, delivery time buckets and the price tiers present in the current snapshot",
    responses(
        (status = 200, body = Facets),
        (status = 502, description = "First snapshot load failed"),
        (status = 503, description = "Snapshot still loading")
    )
)]
pub async fn get_facets(State(state): State<AppState>) -> Result<Response<Facets>, ApiError> {
    let facets = state.service.facets().map_err(ApiError::from)?;

    Ok(Response::OK(facets))
}
