use axum::extract::State;
use carbonplate_core::domain::dish_analysis::{
    ports::CarbonEstimateService,
    value_objects::{CarbonEstimate, EstimateFromTextInput},
};

use crate::application::http::{
    estimate::validators::EstimateTextRequest,
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "/estimate",
    tag = "estimate",
    summary = "Estimate carbon footprint from a dish name",
    description = "Infers the probable ingredients of the dish with an LLM and sums their carbon footprint. Falls back to keyword heuristics when the model is unavailable or its answer cannot be read.",
    responses(
        (status = 200, body = CarbonEstimate),
        (status = 400, description = "Malformed request", body = ApiErrorResponse),
        (status = 422, description = "Invalid dish name", body = ApiErrorResponse)
    ),
    request_body = EstimateTextRequest
)]
pub async fn estimate_from_text(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<EstimateTextRequest>,
) -> Result<Response<CarbonEstimate>, ApiError> {
    let estimate = state
        .service
        .estimate_from_text(EstimateFromTextInput { dish: payload.dish })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(estimate))
}
