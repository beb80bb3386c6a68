use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Display tier used whenever a price range lookup fails or is missing.
pub const DEFAULT_PRICE_TIER: &str = "$$";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PriceRange {
    pub id: String,
    /// Display string, e.g. `$$`.
    pub range: String,
}
