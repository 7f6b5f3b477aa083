use crate::application::http::estimate::router::EstimateApiDoc;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Carbonplate API",
        description = "Estimates the carbon footprint of a dish from its name or a photo"
    ),
    nest(
        (path = "/api", api = EstimateApiDoc),
    )
)]
pub struct ApiDoc;
