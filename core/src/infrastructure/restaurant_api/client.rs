use reqwest::{Client, header::ACCEPT};
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use crate::{
    domain::{
        common::{RestaurantApiConfig, entities::app_errors::CoreError},
        restaurant::{
            entities::{Category, GatewayError, PriceRange, Restaurant},
            ports::RestaurantGateway,
        },
    },
    infrastructure::restaurant_api::mappers::{
        FiltersEnvelope, OpenStatusRecord, PriceRangeRecord, RestaurantsEnvelope,
    },
};

const JSON: &str = "application/json";

#[derive(Debug, Clone)]
pub struct HttpRestaurantGateway {
    base_url: Url,
    client: Client,
}

impl HttpRestaurantGateway {
    pub fn new(config: &RestaurantApiConfig) -> Result<Self, CoreError> {
        config.validate()?;

        let base_url = Url::parse(config.endpoint_root())
            .map_err(|e| CoreError::InvalidConfiguration(e.to_string()))?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| CoreError::InvalidConfiguration(format!("http client: {}", e)))?;

        tracing::info!(base_url = %base_url, "Initializing restaurant API gateway");

        Ok(Self { base_url, client })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_body(&self, resource: &str, url: Url) -> Result<String, GatewayError> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, JSON)
            .send()
            .await
            .map_err(|e| GatewayError::Transport {
                resource: resource.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Status {
                resource: resource.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        response.text().await.map_err(|e| GatewayError::Transport {
            resource: resource.to_string(),
            message: e.to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &str,
        url: Url,
    ) -> Result<T, GatewayError> {
        let body = self.get_body(resource, url).await?;
        serde_json::from_str(&body).map_err(|e| GatewayError::MalformedPayload {
            resource: resource.to_string(),
            message: e.to_string(),
        })
    }
}

impl RestaurantGateway for HttpRestaurantGateway {
    #[instrument(skip(self))]
    async fn fetch_restaurants(&self) -> Result<Vec<Restaurant>, GatewayError> {
        let envelope: RestaurantsEnvelope = self
            .get_json("restaurants", self.endpoint(&["restaurants"]))
            .await
            .inspect_err(|e| tracing::error!("Restaurant collection fetch failed: {}", e))?;

        Ok(envelope
            .restaurants
            .into_iter()
            .map(Restaurant::from)
            .collect())
    }

    #[instrument(skip(self))]
    async fn fetch_filters(&self) -> Result<Vec<Category>, GatewayError> {
        let envelope: FiltersEnvelope = self
            .get_json("filters", self.endpoint(&["filter"]))
            .await
            .inspect_err(|e| tracing::error!("Filter collection fetch failed: {}", e))?;

        Ok(envelope.filters.into_iter().map(Category::from).collect())
    }

    #[instrument(skip(self))]
    async fn fetch_price_range(&self, price_range_id: String) -> Option<PriceRange> {
        if price_range_id.trim().is_empty() {
            tracing::warn!("Price range id is required");
            return None;
        }

        let url = self.endpoint(&["price-range", price_range_id.as_str()]);
        match self.get_json::<PriceRangeRecord>("price range", url).await {
            Ok(record) => {
                let price_range = record.into_price_range(&price_range_id);
                if price_range.is_none() {
                    tracing::warn!("Price range payload has no range");
                }
                price_range
            }
            Err(e) => {
                tracing::warn!("Price range lookup failed: {}", e);
                None
            }
        }
    }

    #[instrument(skip(self))]
    async fn fetch_open_status(&self, restaurant_id: String) -> bool {
        let url = self.endpoint(&["open", restaurant_id.as_str()]);
        match self.get_json::<OpenStatusRecord>("open status", url).await {
            Ok(record) => record.is_open(),
            Err(e) => {
                tracing::warn!("Open status lookup failed: {}", e);
                false
            }
        }
    }
}
