use axum::extract::State;
use dinedex_core::domain::restaurant::ports::DirectoryService;

use super::get_snapshot_status::SnapshotStatusResponse;
use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[utoipa::path(
    post,
    path = "/snapshot/refresh",
    tag = "directory",
    summary = "Reload the directory",
    description = "Runs a new aggregation. A run started later wins over this one if both are in flight.",
    responses(
        (status = 200, body = SnapshotStatusResponse),
        (status = 502, description = "Restaurant or filter collection could not be fetched")
    )
)]
pub async fn refresh_snapshot(
    State(state): State<AppState>,
) -> Result<Response<SnapshotStatusResponse>, ApiError> {
    state.service.load_snapshot().await.map_err(|e| {
        tracing::error!("Snapshot refresh failed: {}", e);
        ApiError::from(e)
    })?;

    Ok(Response::OK(SnapshotStatusResponse::from_service(
        state.service.as_ref(),
    )))
}
