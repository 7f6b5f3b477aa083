use std::borrow::Cow;

use carbonplate_core::domain::dish_analysis::policies::{
    ALLOWED_IMAGE_EXTENSIONS, MAX_DISH_NAME_LENGTH, MAX_IMAGE_SIZE, image_extension,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::application::http::server::api_entities::api_error::ApiError;

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub struct EstimateTextRequest {
    #[schema(example = "Chicken Biryani")]
    /// Dish name, 1 to 200 characters once trimmed
    #[validate(custom(function = "validate_dish_name"))]
    pub dish: String,
}

/// Multipart body of the image endpoint, for the OpenAPI document only.
#[derive(Debug, ToSchema)]
pub struct EstimateImageForm {
    /// Photo of the dish (.jpg, .jpeg, .png, .gif or .webp, at most 20 MB)
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
}

// Checked on the trimmed name, as the core does.
fn validate_dish_name(value: &str) -> Result<(), ValidationError> {
    let dish = value.trim();
    if dish.is_empty() {
        return Err(ValidationError::new("blank")
            .with_message(Cow::Borrowed("dish must not be blank")));
    }
    if dish.chars().count() > MAX_DISH_NAME_LENGTH {
        return Err(ValidationError::new("length").with_message(Cow::Owned(format!(
            "dish must be at most {MAX_DISH_NAME_LENGTH} characters"
        ))));
    }
    Ok(())
}

/// Declared part types other than `image/*` are refused; a missing or
/// generic `application/octet-stream` type defers to the file extension.
pub fn validate_image_content_type(content_type: Option<&str>) -> Result<(), ApiError> {
    match content_type {
        None => Ok(()),
        Some(content_type)
            if content_type.starts_with("image/")
                || content_type == "application/octet-stream" =>
        {
            Ok(())
        }
        Some(content_type) => Err(ApiError::UnsupportedMediaType(format!(
            "unsupported content type {content_type}, expected an image"
        ))),
    }
}

pub fn validate_image_upload(file_name: &str, size_bytes: usize) -> Result<(), ApiError> {
    if size_bytes == 0 {
        return Err(ApiError::validation("image", "image must not be empty"));
    }

    if size_bytes > MAX_IMAGE_SIZE {
        return Err(ApiError::PayloadTooLarge(format!(
            "Image too large. Max size is {} bytes",
            MAX_IMAGE_SIZE
        )));
    }

    if image_extension(file_name).is_none() {
        return Err(ApiError::validation(
            "image",
            format!(
                "unsupported image format, allowed extensions: {}",
                ALLOWED_IMAGE_EXTENSIONS
                    .iter()
                    .map(|ext| format!(".{ext}"))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        ));
    }

    Ok(())
}
