use std::path::Path;

use crate::domain::common::entities::app_errors::CoreError;

pub const MAX_IMAGE_SIZE: usize = 20 * 1024 * 1024; // 20MB
pub const ALLOWED_IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];
pub const MAX_DISH_NAME_LENGTH: usize = 200;

/// Returns the trimmed dish name.
pub fn ensure_valid_dish_name(dish: &str) -> Result<String, CoreError> {
    let dish = dish.trim();
    if dish.is_empty() {
        return Err(CoreError::Invalid("dish name must not be empty".to_string()));
    }
    if dish.chars().count() > MAX_DISH_NAME_LENGTH {
        return Err(CoreError::Invalid(format!(
            "dish name must be at most {} characters",
            MAX_DISH_NAME_LENGTH
        )));
    }
    Ok(dish.to_string())
}

pub fn ensure_valid_image(file_name: &str, size_bytes: usize) -> Result<(), CoreError> {
    if size_bytes == 0 {
        return Err(CoreError::Invalid("image must not be empty".to_string()));
    }
    if size_bytes > MAX_IMAGE_SIZE {
        return Err(CoreError::Invalid(format!(
            "image too large, max size is {} bytes",
            MAX_IMAGE_SIZE
        )));
    }
    image_extension(file_name).ok_or_else(|| {
        CoreError::Invalid(format!(
            "unsupported image format, allowed extensions: {}",
            ALLOWED_IMAGE_EXTENSIONS
                .iter()
                .map(|ext| format!(".{ext}"))
                .collect::<Vec<_>>()
                .join(", ")
        ))
    })?;
    Ok(())
}

/// Lowercased extension, only when it is one we accept.
pub fn image_extension(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .filter(|ext| ALLOWED_IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

pub fn mime_type_for(file_name: &str) -> Option<&'static str> {
    match image_extension(file_name)?.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}
