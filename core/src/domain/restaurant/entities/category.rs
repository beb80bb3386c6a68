use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A food category restaurants can be filtered by (upstream calls these "filters").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub image_url: String,
}
