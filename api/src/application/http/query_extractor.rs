use axum::{extract::FromRequestParts, http::request::Parts};
use dinedex_core::domain::listing::value_objects::FilterSelection;

use super::{query_params::selection_from_pairs, server::api_entities::api_error::ApiError};

/// Extractor for the filter selection carried in the query string
///
/// Usage:
/// ```rust,ignore
/// async fn handler(
///     SelectionExtractor(selection): SelectionExtractor,
/// ) -> Result<Response, ApiError> {
///     // Use selection.categories, selection.delivery_times, selection.price_tiers
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SelectionExtractor(pub FilterSelection);

impl<S> FromRequestParts<S> for SelectionExtractor
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let query_string = parts.uri.query().unwrap_or("");
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query_string)
            .map_err(|e| ApiError::BadRequest(format!("invalid query string: {}", e)))?;

        Ok(SelectionExtractor(selection_from_pairs(&pairs)))
    }
}
