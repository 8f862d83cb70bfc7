use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use user_crud_shared::models::ErrorBody;

use crate::response::api_response;

// Static messages returned to callers. Store errors are logged, never echoed.
pub const ERR_FAILED_TO_FETCH_RECORD: &str = "failed to fetch record";
pub const ERR_INVALID_USER_DATA: &str = "invalid user data";
pub const ERR_INVALID_EMAIL: &str = "invalid email";
pub const ERR_USER_ALREADY_EXISTS: &str = "user already exists";
pub const ERR_USER_DOES_NOT_EXIST: &str = "user does not exist";
pub const ERR_COULD_NOT_MARSHAL_ITEM: &str = "could not marshal item";
pub const ERR_COULD_NOT_PUT_ITEM: &str = "could not put item";
pub const ERR_COULD_NOT_DELETE_ITEM: &str = "could not delete item";
pub const ERR_METHOD_NOT_ALLOWED: &str = "Method Not Allowed";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// The body could not be decoded as a user record
    #[error("Invalid body: {0}")]
    InvalidBody(&'static str),

    #[error("Validation error: {0}")]
    ValidationError(&'static str),

    #[error("Not found: {0}")]
    NotFound(&'static str),

    #[error("Already exists: {0}")]
    AlreadyExists(&'static str),

    #[error("Store failure: {0}")]
    StoreFailure(&'static str),

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(&'static str),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidBody(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::ValidationError(_)
            | AppError::NotFound(_)
            | AppError::AlreadyExists(_)
            | AppError::StoreFailure(_) => StatusCode::BAD_REQUEST,
            AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            AppError::InvalidBody(msg)
            | AppError::ValidationError(msg)
            | AppError::NotFound(msg)
            | AppError::AlreadyExists(msg)
            | AppError::StoreFailure(msg)
            | AppError::MethodNotAllowed(msg) => msg,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        // Store failures are already logged with their cause where they were mapped
        if !matches!(self, AppError::StoreFailure(_)) {
            tracing::warn!("Request rejected: {}", self);
        }

        tracing::info!(
            "Returning error response: status={}, message={}",
            status,
            self.message()
        );
        api_response(status, &ErrorBody::new(self.message()))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
