use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use nutriscan_core::domain::common::entities::app_errors::CoreError;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    UnprocessableEntity(String),

    #[error("{0}")]
    InternalServerError(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    pub code: String,
    pub status: u16,
    pub message: String,
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "E_BAD_REQUEST"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "E_NOT_FOUND"),
            ApiError::Forbidden(_) => (StatusCode::FORBIDDEN, "E_FORBIDDEN"),
            ApiError::UnprocessableEntity(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "E_UNPROCESSABLE_ENTITY")
            }
            ApiError::InternalServerError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "E_INTERNAL_SERVER_ERROR")
            }
        }
    }

    pub fn to_body(&self) -> ApiErrorResponse {
        let (status, code) = self.status_and_code();
        ApiErrorResponse {
            code: code.to_string(),
            status: status.as_u16(),
            message: self.to_string(),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::NotFound => ApiError::NotFound("Resource not found".to_string()),
            CoreError::Invalid => ApiError::BadRequest("Invalid input".to_string()),
            CoreError::Forbidden(message) => ApiError::Forbidden(message),
            CoreError::ExtractionError(_) => ApiError::UnprocessableEntity(error.to_string()),
            CoreError::ModelCallError(_) | CoreError::ObjectStorageError(_) => {
                ApiError::InternalServerError(error.to_string())
            }
            CoreError::InternalServerError => {
                ApiError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, _) = self.status_and_code();
        (status, Json(self.to_body())).into_response()
    }
}

/// JSON body extractor that runs `validator` rules before the handler sees it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidateJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;

        value
            .validate()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;

        Ok(ValidateJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extraction_errors_are_unprocessable() {
        let error = ApiError::from(CoreError::ExtractionError("blurry image".to_string()));

        assert_eq!(
            error,
            ApiError::UnprocessableEntity("Text extraction failed: blurry image".to_string())
        );
        assert_eq!(error.to_body().status, 422);
    }

    #[test]
    fn core_errors_map_to_http_statuses() {
        assert_eq!(ApiError::from(CoreError::NotFound).to_body().status, 404);
        assert_eq!(ApiError::from(CoreError::Invalid).to_body().status, 400);
        assert_eq!(
            ApiError::from(CoreError::Forbidden("no".to_string()))
                .to_body()
                .status,
            403
        );
        assert_eq!(
            ApiError::from(CoreError::InternalServerError).to_body().status,
            500
        );
    }

    #[test]
    fn body_carries_code_status_and_message() {
        let body = ApiError::BadRequest("Missing image field".to_string()).to_body();

        assert_eq!(
            body,
            ApiErrorResponse {
                code: "E_BAD_REQUEST".to_string(),
                status: 400,
                message: "Missing image field".to_string(),
            }
        );
    }
}
