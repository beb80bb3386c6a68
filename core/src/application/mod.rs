use crate::{
    domain::common::{DinedexConfig, entities::app_errors::CoreError, services::Service},
    infrastructure::restaurant_api::HttpRestaurantGateway,
};

pub type DinedexService = Service<HttpRestaurantGateway>;

pub fn create_service(config: DinedexConfig) -> Result<DinedexService, CoreError> {
    let gateway = HttpRestaurantGateway::new(&config.restaurant_api)?;
    let asset_origin = config.restaurant_api.asset_origin();

    Ok(Service::new(gateway, asset_origin))
}
