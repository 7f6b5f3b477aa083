pub mod estimate_from_image;
pub mod estimate_from_text;
