use std::time::Duration;

use url::Url;

use crate::domain::common::entities::app_errors::CoreError;

pub mod entities;
pub mod services;

pub const DEFAULT_API_BASE_URL: &str = "https://work-test-web-2024-eze6j4scpq-lz.a.run.app/api";

#[derive(Clone, Debug)]
pub struct DinedexConfig {
    pub restaurant_api: RestaurantApiConfig,
}

#[derive(Clone, Debug)]
pub struct RestaurantApiConfig {
    pub base_url: String,
    pub request_timeout: Option<Duration>,
}

impl Default for RestaurantApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: None,
        }
    }
}

impl RestaurantApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout: None,
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        let parsed = Url::parse(&self.base_url).map_err(|e| {
            CoreError::InvalidConfiguration(format!("invalid base url {}: {}", self.base_url, e))
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(CoreError::InvalidConfiguration(format!(
                "unsupported scheme {} in base url",
                parsed.scheme()
            )));
        }

        Ok(())
    }

    /// Base URL without a trailing slash, used to build endpoint paths.
    pub fn endpoint_root(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Origin that relative image paths are resolved against: the base URL
    /// with its `/api` suffix removed.
    pub fn asset_origin(&self) -> String {
        let root = self.endpoint_root();
        root.strip_suffix("/api").unwrap_or(root).to_string()
    }
}

/// Resolves a restaurant or category image path against the asset origin.
pub fn resolve_image_url(asset_origin: &str, image_url: &str) -> String {
    if image_url.starts_with("http://") || image_url.starts_with("https://") {
        return image_url.to_string();
    }

    if image_url.is_empty() || image_url.starts_with('/') {
        format!("{}{}", asset_origin, image_url)
    } else {
        format!("{}/{}", asset_origin, image_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_origin_strips_api_suffix() {
        let config = RestaurantApiConfig::new("https://example.test/api");
        assert_eq!(config.asset_origin(), "https://example.test");

        let config = RestaurantApiConfig::new("https://example.test/api/");
        assert_eq!(config.asset_origin(), "https://example.test");
    }

    #[test]
    fn test_asset_origin_without_api_suffix() {
        let config = RestaurantApiConfig::new("http://127.0.0.1:8080");
        assert_eq!(config.asset_origin(), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_validate_rejects_bad_urls() {
        assert!(RestaurantApiConfig::new("not a url").validate().is_err());
        assert!(
            RestaurantApiConfig::new("ftp://example.test")
                .validate()
                .is_err()
        );
        assert!(RestaurantApiConfig::default().validate().is_ok());
    }

    #[test]
    fn test_resolve_image_url() {
        let origin = "https://example.test";
        assert_eq!(
            resolve_image_url(origin, "/images/pizza.png"),
            "https://example.test/images/pizza.png"
        );
        assert_eq!(
            resolve_image_url(origin, "images/pizza.png"),
            "https://example.test/images/pizza.png"
        );
        assert_eq!(
            resolve_image_url(origin, "https://cdn.test/pizza.png"),
            "https://cdn.test/pizza.png"
        );
    }
}
