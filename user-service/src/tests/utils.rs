use axum::{body::Body, http::Request, Router};
use std::sync::Arc;
use user_crud_shared::models::User;
use user_crud_shared::test_utils::mock_user_store::MockUserStore;
use user_crud_shared::test_utils::test_logging::init_test_logging;

use crate::routes;

/// Router over a fresh in-memory store; the store is returned for direct assertions
pub fn test_app_with(users: Vec<User>) -> (Router, Arc<MockUserStore>) {
    init_test_logging();
    let store = Arc::new(MockUserStore::with_data(users));
    (routes::create_router_with_store(store.clone()), store)
}

pub fn test_app() -> (Router, Arc<MockUserStore>) {
    test_app_with(Vec::new())
}

/// Router whose store fails every call
pub fn failing_app() -> Router {
    init_test_logging();
    routes::create_router_with_store(Arc::new(MockUserStore::failing()))
}

/// Router over a store built by the caller, e.g. one with a targeted failure mode
pub fn app_with_store(store: MockUserStore) -> Router {
    init_test_logging();
    routes::create_router_with_store(Arc::new(store))
}

pub fn user(email: &str, first_name: &str, last_name: &str) -> User {
    User {
        email: email.to_string(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
    }
}

/// Builds a request with an optional JSON body
pub fn create_test_request(method: &str, uri: &str, body: Option<String>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub fn user_body(user: &User) -> Option<String> {
    Some(serde_json::to_string(user).unwrap())
}
