use axum::{
    routing::{get, MethodRouter},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::handlers::{
    method_not_allowed,
    user_handlers::{create_user, delete_user, fetch_users, update_user},
};
use user_crud_shared::config::StoreConfig;
use user_crud_shared::error::Result;
use user_crud_shared::store::{dynamo::DynamoUserStore, UserStore};

/// Creates a router backed by DynamoDB, configured from the environment
pub async fn create_router() -> Result<Router> {
    let config = StoreConfig::from_env()?;
    info!(
        "Creating router with DynamoDB store: table={}",
        config.table_name
    );

    let store = Arc::new(DynamoUserStore::new(&config).await);
    Ok(create_router_with_store(store))
}

/// Creates a router with a given store implementation.
///
/// Every path is served by the same method dispatch, so `/`, `/users` and `/Prod/users` behave
/// identically.
pub fn create_router_with_store<S>(store: Arc<S>) -> Router
where
    S: UserStore,
{
    let methods = user_methods::<S>();

    Router::new()
        .route("/", methods.clone())
        .route("/*path", methods)
        .with_state(store)
        // No CORS layer: it answers OPTIONS before the 405 fallback can
        .layer(TraceLayer::new_for_http())
}

fn user_methods<S>() -> MethodRouter<Arc<S>>
where
    S: UserStore,
{
    get(fetch_users::<S>)
        .post(create_user::<S>)
        .put(update_user::<S>)
        .delete(delete_user::<S>)
        // axum would otherwise answer HEAD from the GET handler
        .head(method_not_allowed)
        .fallback(method_not_allowed)
}
