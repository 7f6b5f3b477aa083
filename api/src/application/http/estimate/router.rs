use super::handlers::{
    estimate_from_image::{__path_estimate_from_image, estimate_from_image},
    estimate_from_text::{__path_estimate_from_text, estimate_from_text},
};
use crate::application::http::server::app_state::AppState;
use axum::{Router, extract::DefaultBodyLimit, routing::post};
use carbonplate_core::domain::dish_analysis::policies::MAX_IMAGE_SIZE;
use utoipa::OpenApi;

/// Room for the multipart framing around the largest accepted image.
const MAX_IMAGE_BODY_SIZE: usize = MAX_IMAGE_SIZE + 1024 * 1024;

#[derive(OpenApi)]
#[openapi(paths(estimate_from_text, estimate_from_image))]
pub struct EstimateApiDoc;

pub fn estimate_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/api/estimate", state.args.server.root_path),
            post(estimate_from_text),
        )
        .route(
            &format!("{}/api/estimate/image", state.args.server.root_path),
            post(estimate_from_image).layer(DefaultBodyLimit::max(MAX_IMAGE_BODY_SIZE)),
        )
}
