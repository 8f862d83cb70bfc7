use async_trait::async_trait;

use crate::error::Result;
use crate::models::{DeletedUser, User};

// Expose the DynamoDB store module
pub mod dynamo;

/// UserStore trait defining the four calls the service makes against the user table
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Looks a user up by email. `Ok(None)` means the key is absent.
    async fn get_user(&self, email: &str) -> Result<Option<User>>;

    /// Returns every user in the table
    async fn list_users(&self) -> Result<Vec<User>>;

    /// Inserts or fully overwrites a user
    async fn put_user(&self, user: &User) -> Result<()>;

    /// Deletes a user by email. Deleting an absent key is not an error.
    async fn delete_user(&self, email: &str) -> Result<DeletedUser>;
}
