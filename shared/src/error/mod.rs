use aws_sdk_dynamodb::error::{DisplayErrorContext, SdkError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store request failed: {0}")]
    StoreFailure(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

// Helper function to map any DynamoDB SDK error, keeping the full error chain in the message
pub fn map_dynamo_error<E, R>(operation: &str, err: SdkError<E, R>) -> StoreError
where
    E: std::error::Error + 'static,
    R: std::fmt::Debug,
{
    StoreError::StoreFailure(format!(
        "DynamoDB {} error: {}",
        operation,
        DisplayErrorContext(&err)
    ))
}

impl From<serde_dynamo::Error> for StoreError {
    fn from(err: serde_dynamo::Error) -> Self {
        StoreError::Serialization(format!("DynamoDB attribute conversion error: {}", err))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(format!("JSON serialization error: {}", err))
    }
}
