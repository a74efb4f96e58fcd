use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Largest accepted label photo.
pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024;

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub struct AnalyzeLabelTextRequest {
    #[validate(length(
        min = 1,
        max = 20000,
        message = "text must be between 1 and 20000 characters"
    ))]
    pub text: String,
}

/// Checks an uploaded part before it reaches OCR.
pub fn validate_label_upload(content_type: Option<&str>, size: usize) -> Result<String, String> {
    let content_type = content_type
        .map(str::trim)
        .filter(|ct| ct.starts_with("image/"))
        .ok_or_else(|| "Uploaded file must be an image".to_string())?;

    if size == 0 {
        return Err("Uploaded image is empty".to_string());
    }

    if size > MAX_IMAGE_SIZE {
        return Err(format!(
            "Image too large. Max size is {} bytes",
            MAX_IMAGE_SIZE
        ));
    }

    Ok(content_type.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_images_within_limit() {
        assert_eq!(
            validate_label_upload(Some("image/png"), 1024),
            Ok("image/png".to_string())
        );
        assert!(validate_label_upload(Some("image/jpeg"), MAX_IMAGE_SIZE).is_ok());
    }

    #[test]
    fn rejects_non_images() {
        assert!(validate_label_upload(Some("application/pdf"), 10).is_err());
        assert!(validate_label_upload(None, 10).is_err());
    }

    #[test]
    fn rejects_empty_and_oversized_uploads() {
        assert!(validate_label_upload(Some("image/png"), 0).is_err());
        assert!(validate_label_upload(Some("image/png"), MAX_IMAGE_SIZE + 1).is_err());
    }

    #[test]
    fn text_request_requires_content() {
        let empty = AnalyzeLabelTextRequest {
            text: String::new(),
        };
        assert!(empty.validate().is_err());

        let ok = AnalyzeLabelTextRequest {
            text: "Ingredients: oats".to_string(),
        };
        assert!(ok.validate().is_ok());
    }
}
