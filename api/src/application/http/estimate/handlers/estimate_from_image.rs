use axum::extract::{Multipart, State};
use bytes::Bytes;
use carbonplate_core::domain::dish_analysis::{
    ports::CarbonEstimateService,
    value_objects::{CarbonEstimate, EstimateFromImageInput},
};
use tracing::{debug, error};

use crate::application::http::{
    estimate::validators::{
        EstimateImageForm, validate_image_content_type, validate_image_upload,
    },
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse},
            response::Response,
        },
        app_state::AppState,
    },
};

struct ImageUpload {
    file_name: String,
    content_type: Option<String>,
    data: Bytes,
}

#[utoipa::path(
    post,
    path = "/estimate/image",
    tag = "estimate",
    summary = "Estimate carbon footprint from a photo",
    description = "Identifies the dish and its ingredients in the uploaded photo with a vision LLM and sums their carbon footprint. Falls back to a generic estimate when the model is unavailable or its answer cannot be read.",
    request_body(content = EstimateImageForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, body = CarbonEstimate),
        (status = 400, description = "Malformed multipart body", body = ApiErrorResponse),
        (status = 413, description = "Image larger than 20 MB", body = ApiErrorResponse),
        (status = 415, description = "Declared content type is not an image", body = ApiErrorResponse),
        (status = 422, description = "Missing image or unsupported format", body = ApiErrorResponse)
    )
)]
pub async fn estimate_from_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response<CarbonEstimate>, ApiError> {
    let mut upload: Option<ImageUpload> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        error!("Failed to read multipart field: {}", e);
        ApiError::from(e)
    })? {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "image" => {
                let file_name = field.file_name().map(str::to_string).ok_or_else(|| {
                    ApiError::validation("image", "image must be uploaded as a file")
                })?;
                let content_type = field.content_type().map(str::to_string);
                validate_image_content_type(content_type.as_deref())?;
                let data = field.bytes().await.map_err(ApiError::from)?;

                validate_image_upload(&file_name, data.len())?;

                upload = Some(ImageUpload {
                    file_name,
                    content_type,
                    data,
                });
            }
            other => {
                debug!(field = other, "ignoring unknown multipart field");
            }
        }
    }

    let upload = upload.ok_or_else(|| ApiError::validation("image", "missing image field"))?;

    let estimate = state
        .service
        .estimate_from_image(EstimateFromImageInput {
            file_name: upload.file_name,
            content_type: upload.content_type,
            image_data: upload.data,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(estimate))
}
