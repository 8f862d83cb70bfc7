use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{Result, StoreError};
use crate::models::{DeletedUser, User};
use crate::store::UserStore;

/// Which calls a MockUserStore should fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum FailureMode {
    #[default]
    Never,
    Always,
    /// Only the named operation (`get_item`, `scan`, `put_item`, `delete_item`)
    On(&'static str),
    /// `put_user` reports an attribute conversion error
    Marshal,
}

/// MockUserStore is a simple in-memory implementation of UserStore for testing.
///
/// Like DynamoDB, it rejects an empty string as a key.
#[derive(Default)]
pub struct MockUserStore {
    users: Mutex<HashMap<String, User>>,
    failure: FailureMode,
}

impl MockUserStore {
    /// Create a new empty MockUserStore
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a MockUserStore with initial test data
    pub fn with_data(users: Vec<User>) -> Self {
        Self::with_failure(users, FailureMode::Never)
    }

    /// A store whose every call fails, for exercising error paths
    pub fn failing() -> Self {
        Self::with_failure(Vec::new(), FailureMode::Always)
    }

    /// A store that fails only `operation`, seeded with `users`
    pub fn failing_on(operation: &'static str, users: Vec<User>) -> Self {
        Self::with_failure(users, FailureMode::On(operation))
    }

    /// A store whose `put_user` fails to convert the record into an item
    pub fn failing_to_marshal(users: Vec<User>) -> Self {
        Self::with_failure(users, FailureMode::Marshal)
    }

    fn with_failure(users: Vec<User>, failure: FailureMode) -> Self {
        let users = users
            .into_iter()
            .map(|user| (user.email.clone(), user))
            .collect();
        Self {
            users: Mutex::new(users),
            failure,
        }
    }

    /// Number of stored users, for assertions that bypass the trait
    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check(&self, operation: &str) -> Result<()> {
        let fails = match self.failure {
            FailureMode::Always => true,
            FailureMode::On(failing) => failing == operation,
            FailureMode::Never | FailureMode::Marshal => false,
        };
        if fails {
            return Err(StoreError::StoreFailure(format!(
                "mock {} failure",
                operation
            )));
        }
        Ok(())
    }

    fn check_key(operation: &str, email: &str) -> Result<()> {
        if email.is_empty() {
            return Err(StoreError::StoreFailure(format!(
                "mock {} failure: key attribute email must not be empty",
                operation
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for MockUserStore {
    async fn get_user(&self, email: &str) -> Result<Option<User>> {
        self.check("get_item")?;
        Self::check_key("get_item", email)?;
        Ok(self.users.lock().unwrap().get(email).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        self.check("scan")?;
        let mut users: Vec<User> = self.users.lock().unwrap().values().cloned().collect();
        // HashMap order is arbitrary; sort so tests can assert on positions
        users.sort_by(|a, b| a.email.cmp(&b.email));
        Ok(users)
    }

    async fn put_user(&self, user: &User) -> Result<()> {
        self.check("put_item")?;
        if self.failure == FailureMode::Marshal {
            return Err(StoreError::Serialization(
                "mock attribute conversion failure".to_string(),
            ));
        }
        Self::check_key("put_item", &user.email)?;
        // Mirror the DynamoDB codec so attribute conversion problems show up here too
        let stored = User::from_item(user.to_item()?)?;
        self.users
            .lock()
            .unwrap()
            .insert(stored.email.clone(), stored);
        Ok(())
    }

    async fn delete_user(&self, email: &str) -> Result<DeletedUser> {
        self.check("delete_item")?;
        Self::check_key("delete_item", email)?;
        let attributes = self.users.lock().unwrap().remove(email);
        Ok(DeletedUser { attributes })
    }
}
