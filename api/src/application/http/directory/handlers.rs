pub mod get_facets;
pub mod get_snapshot_status;
pub mod list_restaurants;
pub mod refresh_snapshot;
