use crate::application::http::{directory::router::DirectoryApiDoc, health::HealthApiDoc};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(info(title = "Dinedex API"))]
pub struct ApiDoc;

impl ApiDoc {
    pub fn build() -> utoipa::openapi::OpenApi {
        let mut openapi = ApiDoc::openapi();
        openapi.merge(DirectoryApiDoc::openapi());
        openapi.merge(HealthApiDoc::openapi());
        openapi
    }
}
