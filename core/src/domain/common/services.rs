use crate::domain::{restaurant::ports::RestaurantGateway, snapshot::store::SnapshotStore};

/// Aggregation service over a restaurant gateway.
///
/// Owns the process-wide [`SnapshotStore`]; every `load_snapshot` run publishes
/// into it and every read goes through it.
pub struct Service<G>
where
    G: RestaurantGateway,
{
    pub(crate) gateway: G,
    pub(crate) store: SnapshotStore,
    pub(crate) asset_origin: String,
}

impl<G> Service<G>
where
    G: RestaurantGateway,
{
    pub fn new(gateway: G, asset_origin: String) -> Self {
        Self {
            gateway,
            store: SnapshotStore::new(),
            asset_origin,
        }
    }

    pub fn asset_origin(&self) -> &str {
        &self.asset_origin
    }
}
