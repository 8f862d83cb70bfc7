use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::types::ReturnValue;
use aws_sdk_dynamodb::Client;

use crate::config::StoreConfig;
use crate::error::{map_dynamo_error, Result};
use crate::models::{user_key, DeletedUser, Item, User};

/// DynamoDB store for users, keyed on `email`
pub struct DynamoUserStore {
    client: Client,
    table_name: String,
}

impl DynamoUserStore {
    /// Creates a store from the AWS default credential chain and the given config
    pub async fn new(config: &StoreConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(endpoint_url) = &config.endpoint_url {
            tracing::info!("Using DynamoDB endpoint override: {}", endpoint_url);
            loader = loader.endpoint_url(endpoint_url);
        }
        let sdk_config = loader.load().await;

        Self::with_client_and_table(Client::new(&sdk_config), config.table_name.clone())
    }

    /// Creates a new DynamoDB store with the specified client and table name.
    /// This is mainly useful for testing with a local DynamoDB instance.
    pub fn with_client_and_table(client: Client, table_name: String) -> Self {
        Self { client, table_name }
    }
}

#[async_trait]
impl super::UserStore for DynamoUserStore {
    async fn get_user(&self, email: &str) -> Result<Option<User>> {
        let response = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .set_key(Some(user_key(email)))
            .send()
            .await
            .map_err(|e| map_dynamo_error("get_item", e))?;

        match response.item() {
            Some(item) => Ok(Some(User::from_item(item.clone())?)),
            None => {
                tracing::debug!("No user stored under {}", email);
                Ok(None)
            }
        }
    }

    /// Scans the whole table, following `LastEvaluatedKey` until the last page.
    async fn list_users(&self) -> Result<Vec<User>> {
        let mut users = Vec::new();
        let mut start_key: Option<Item> = None;
        let mut pages = 0usize;

        loop {
            let response = self
                .client
                .scan()
                .table_name(&self.table_name)
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(|e| map_dynamo_error("scan", e))?;
            pages += 1;

            for item in response.items() {
                users.push(User::from_item(item.clone())?);
            }

            match response.last_evaluated_key() {
                Some(key) if !key.is_empty() => start_key = Some(key.clone()),
                _ => break,
            }
        }

        tracing::debug!("Scanned {} users in {} page(s)", users.len(), pages);
        Ok(users)
    }

    async fn put_user(&self, user: &User) -> Result<()> {
        let item = user.to_item()?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| map_dynamo_error("put_item", e))?;

        Ok(())
    }

    async fn delete_user(&self, email: &str) -> Result<DeletedUser> {
        let response = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .set_key(Some(user_key(email)))
            .return_values(ReturnValue::AllOld)
            .send()
            .await
            .map_err(|e| map_dynamo_error("delete_item", e))?;

        let attributes = match response.attributes() {
            Some(item) if !item.is_empty() => Some(User::from_item(item.clone())?),
            _ => None,
        };

        Ok(DeletedUser { attributes })
    }
}
