use super::handlers::{
    get_facets::{__path_get_facets, get_facets},
    get_snapshot_status::{__path_get_snapshot_status, get_snapshot_status},
    list_restaurants::{__path_list_restaurants, list_restaurants},
    refresh_snapshot::{__path_refresh_snapshot, refresh_snapshot},
};
use crate::application::http::server::app_state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(list_restaurants, get_facets, get_snapshot_status, refresh_snapshot))]
pub struct DirectoryApiDoc;

pub fn directory_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;

    Router::new()
        .route(&format!("{}/restaurants", root_path), get(list_restaurants))
        .route(&format!("{}/facets", root_path), get(get_facets))
        .route(&format!("{}/snapshot", root_path), get(get_snapshot_status))
        .route(
            &format!("{}/snapshot/refresh", root_path),
            post(refresh_snapshot),
        )
}
