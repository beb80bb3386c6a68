use axum::extract::State;
use chrono::{DateTime, Utc};
use dinedex_core::domain::{
    restaurant::ports::DirectoryService, snapshot::entities::DirectoryView,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::{api_entities::response::Response, app_state::AppState};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotState {
    Loading,
    Ready,
    Failed,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SnapshotStatusResponse {
    pub state: SnapshotState,
    pub loaded_at: Option<DateTime<Utc>>,
    pub restaurant_count: Option<usize>,
    pub last_error: Option<String>,
}

impl SnapshotStatusResponse {
    pub fn from_service<S: DirectoryService>(service: &S) -> Self {
        let last_error = service.last_error();
        match service.view() {
            DirectoryView::Loading => Self {
                state: SnapshotState::Loading,
                loaded_at: None,
                restaurant_count: None,
                last_error,
            },
            DirectoryView::Ready(snapshot) => Self {
                state: SnapshotState::Ready,
                loaded_at: Some(snapshot.loaded_at),
                restaurant_count: Some(snapshot.restaurants.len()),
                last_error,
            },
            DirectoryView::Failed { message } => Self {
                state: SnapshotState::Failed,
                loaded_at: None,
                restaurant_count: None,
                last_error: Some(message),
            },
        }
    }
}

#[utoipa::path(
    get,
    path = "/snapshot",
    tag = "directory",
    summary = "Get snapshot status",
    responses(
        (status = 200, body = SnapshotStatusResponse)
    )
)]
pub async fn get_snapshot_status(
    State(state): State<AppState>,
) -> Response<SnapshotStatusResponse> {
    Response::OK(SnapshotStatusResponse::from_service(state.service.as_ref()))
}
