pub mod user_handlers;

use axum::http::Method;

use crate::error::{AppError, ERR_METHOD_NOT_ALLOWED};

// Fallback for any method the user routes don't serve
pub async fn method_not_allowed(method: Method) -> AppError {
    tracing::warn!("Unsupported method: {}", method);
    AppError::MethodNotAllowed(ERR_METHOD_NOT_ALLOWED)
}
