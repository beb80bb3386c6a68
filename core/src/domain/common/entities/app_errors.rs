use thiserror::Error;

use crate::domain::restaurant::entities::errors::GatewayError;

#[derive(Debug, Clone, Error)]
pub enum CoreError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("Snapshot is still loading")]
    SnapshotLoading,

    #[error("Snapshot unavailable: {0}")]
    SnapshotUnavailable(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}
