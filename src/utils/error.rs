use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use thiserror::Error;

use crate::comment::tree::TreeError;
use crate::utils::config::service_name;

#[derive(Debug, Error)]
pub enum CustomError {
    #[error("Unauthenticated: {0}")]
    UnauthenticatedError(String),

    #[error("Forbidden: {0}")]
    ForbiddenError(String),

    #[error("Bad Request: {0}")]
    BadRequestError(String),

    #[error("Conflict: {0}")]
    ConflictError(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Not Found: {0}")]
    NotFoundError(String),

    #[error("Validation Error: {0}")]
    ValidationError(String),
}

impl From<TreeError> for CustomError {
    fn from(err: TreeError) -> Self {
        CustomError::NotFoundError(err.to_string())
    }
}

impl ResponseError for CustomError {
    fn status_code(&self) -> StatusCode {
        match *self {
            CustomError::UnauthenticatedError(..) => StatusCode::UNAUTHORIZED,
            CustomError::ForbiddenError(..) => StatusCode::FORBIDDEN,
            CustomError::BadRequestError(..) => StatusCode::BAD_REQUEST,
            CustomError::ConflictError(..) => StatusCode::CONFLICT,
            CustomError::InternalServerError(..) => StatusCode::INTERNAL_SERVER_ERROR,
            CustomError::NotFoundError(..) => StatusCode::NOT_FOUND,
            CustomError::ValidationError(..) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error_message = json!({
            "success": false,
            "message": self.to_string(),
            "httpStatusCode": self.status_code().as_u16(),
            "error": match *self {
                CustomError::UnauthenticatedError(..) => "UNAUTHENTICATED_ERROR",
                CustomError::ForbiddenError(..) => "FORBIDDEN_ERROR",
                CustomError::BadRequestError(..) => "BAD_REQUEST_ERROR",
                CustomError::ConflictError(..) => "CONFLICT_ERROR",
                CustomError::InternalServerError(..) => "INTERNAL_SERVER_ERROR",
                CustomError::NotFoundError(..) => "NOT_FOUND_ERROR",
                CustomError::ValidationError(..) => "VALIDATION_ERROR",
            },
            "service": service_name(),
        });

        HttpResponse::build(self.status_code()).json(error_message)
    }
}
