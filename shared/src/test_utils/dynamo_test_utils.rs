//! # DynamoDB test utilities
//!
//! These helpers create and clean a user table on a DynamoDB local instance. Tests that use
//! them should return early unless [`use_dynamodb`] is true, so the default test run needs no
//! running database.
//!
//! ## Example
//! ```rust,ignore
//! use user_crud_shared::test_utils::test_logging::init_test_logging;
//! use user_crud_shared::test_utils::dynamo_test_utils;
//!
//! #[tokio::test]
//! async fn my_dynamo_test() {
//!     if !dynamo_test_utils::use_dynamodb() {
//!         return;
//!     }
//!     init_test_logging();
//!     let client = dynamo_test_utils::create_dynamo_client().await;
//!     dynamo_test_utils::create_user_table(&client, "user-test-table").await.unwrap();
//!     // ...
//! }
//! ```

use aws_sdk_dynamodb::types::{
    AttributeDefinition, BillingMode, KeySchemaElement, KeyType, ScalarAttributeType, TableStatus,
};
use aws_sdk_dynamodb::Client;
use std::error::Error;
// Use log macros, but ensure test_logging::init_test_logging() is called in test files
use log::{debug, error, info};

use crate::models::{user_key, KEY_ATTRIBUTE};

// Constants for DynamoDB tests
pub const DYNAMO_LOCAL_URI: &str = "http://localhost:8000";

// Helper to check if DynamoDB integration tests should be used
pub fn use_dynamodb() -> bool {
    std::env::var("USE_DYNAMODB").unwrap_or_default() == "true"
}

// Helper to set up a DynamoDB client for local testing
pub async fn create_dynamo_client() -> Client {
    let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .endpoint_url(DYNAMO_LOCAL_URI)
        .load()
        .await;

    Client::new(&config)
}

async fn table_exists(client: &Client, table_name: &str) -> Result<bool, Box<dyn Error>> {
    let tables = client.list_tables().send().await?;
    Ok(tables.table_names().iter().any(|name| name == table_name))
}

// Helper to (re)create the user table, hash-keyed on `email`, and wait until it is ACTIVE
pub async fn create_user_table(client: &Client, table_name: &str) -> Result<(), Box<dyn Error>> {
    info!("Creating user table '{}' for testing...", table_name);

    if table_exists(client, table_name).await? {
        info!("Table '{}' already exists, deleting it first...", table_name);
        client.delete_table().table_name(table_name).send().await?;

        while table_exists(client, table_name).await? {
            debug!("Table '{}' still exists, waiting...", table_name);
            tokio::time::sleep(std::time::Duration::from_secs(1)).await;
        }
    }

    let key = KeySchemaElement::builder()
        .attribute_name(KEY_ATTRIBUTE)
        .key_type(KeyType::Hash)
        .build()?;

    let key_attr = AttributeDefinition::builder()
        .attribute_name(KEY_ATTRIBUTE)
        .attribute_type(ScalarAttributeType::S)
        .build()?;

    let create_result = client
        .create_table()
        .table_name(table_name)
        .key_schema(key)
        .attribute_definitions(key_attr)
        .billing_mode(BillingMode::PayPerRequest)
        .send()
        .await;
    if let Err(e) = &create_result {
        error!("Error creating table '{}': {}", table_name, e);
    }
    create_result?;

    info!("Waiting for table '{}' to become ACTIVE...", table_name);
    loop {
        let resp = client
            .describe_table()
            .table_name(table_name)
            .send()
            .await?;
        let status = resp.table().and_then(|table| table.table_status());
        if status == Some(&TableStatus::Active) {
            break;
        }
        debug!("Table '{}' status: {:?}", table_name, status);
        tokio::time::sleep(std::time::Duration::from_secs(1)).await;
    }

    info!("Table '{}' is ready for testing!", table_name);
    Ok(())
}

// Helper to clean the user table between tests. Failures are logged and skipped.
pub async fn clear_user_table(client: &Client, table_name: &str) {
    let mut last_key = None;
    loop {
        let scan_resp = match client
            .scan()
            .table_name(table_name)
            .set_exclusive_start_key(last_key.take())
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                error!("Failed to scan table '{}': {}", table_name, e);
                break;
            }
        };

        for item in scan_resp.items() {
            let Some(email) = item.get(KEY_ATTRIBUTE).and_then(|v| v.as_s().ok()) else {
                continue;
            };
            if let Err(e) = client
                .delete_item()
                .table_name(table_name)
                .set_key(Some(user_key(email)))
                .send()
                .await
            {
                error!(
                    "Failed to delete item '{}' from table '{}': {}",
                    email, table_name, e
                );
            }
        }

        last_key = scan_resp.last_evaluated_key().cloned();
        if last_key.is_none() {
            break;
        }
    }
}
