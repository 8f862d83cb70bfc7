use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use serde::{Deserialize, Serialize};
use serde_dynamo::{from_item, to_item};

use crate::error::Result;

/// A DynamoDB item in its native attribute format
pub type Item = HashMap<String, AttributeValue>;

/// Name of the table's partition key attribute
pub const KEY_ATTRIBUTE: &str = "email";

/// The user record. Email is the sole key.
///
/// Missing JSON fields decode to empty strings, so `{}` is a valid (if useless) body; the
/// handlers decide what an empty email means.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct User {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl User {
    /// Converts the record into a DynamoDB item (`email`, `firstName`, `lastName`)
    pub fn to_item(&self) -> Result<Item> {
        Ok(to_item(self)?)
    }

    /// Reads a record back out of a DynamoDB item
    pub fn from_item(item: Item) -> Result<Self> {
        Ok(from_item(item)?)
    }
}

/// Builds the primary key for a lookup or delete
pub fn user_key(email: &str) -> Item {
    HashMap::from([(
        KEY_ATTRIBUTE.to_string(),
        AttributeValue::S(email.to_string()),
    )])
}

/// Result of a full table scan
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct UserList {
    #[serde(rename = "Items")]
    pub items: Vec<User>,
    #[serde(rename = "Count")]
    pub count: usize,
}

impl From<Vec<User>> for UserList {
    fn from(items: Vec<User>) -> Self {
        let count = items.len();
        Self { items, count }
    }
}

/// Result of a delete: the removed record, or `None` if the key was never there
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct DeletedUser {
    #[serde(rename = "Attributes")]
    pub attributes: Option<User>,
}

// Error envelope shared by every failure response
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
        }
    }
}
