use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::Response,
};
use std::collections::HashMap;
use std::sync::Arc;
use user_crud_shared::error::StoreError;
use user_crud_shared::models::{User, UserList};
use user_crud_shared::store::UserStore;
use user_crud_shared::validation::is_email_valid;

use crate::error::{
    AppError, Result, ERR_COULD_NOT_DELETE_ITEM, ERR_COULD_NOT_MARSHAL_ITEM,
    ERR_COULD_NOT_PUT_ITEM, ERR_FAILED_TO_FETCH_RECORD, ERR_INVALID_EMAIL, ERR_INVALID_USER_DATA,
    ERR_USER_ALREADY_EXISTS, ERR_USER_DOES_NOT_EXIST,
};
use crate::models::EmailQuery;
use crate::response::{api_response, empty_response};

// GET ?email=   single user when email is given, otherwise the whole table
pub async fn fetch_users<S>(
    State(store): State<Arc<S>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response>
where
    S: UserStore,
{
    match EmailQuery::from(params).email.filter(|email| !email.is_empty()) {
        Some(email) => show_user(store.as_ref(), &email).await,
        None => list_users(store.as_ref()).await,
    }
}

async fn show_user<S>(store: &S, email: &str) -> Result<Response>
where
    S: UserStore,
{
    // Absent and failed lookups answer the same way
    let user = lookup_user(store, email)
        .await?
        .ok_or(AppError::NotFound(ERR_FAILED_TO_FETCH_RECORD))?;

    Ok(api_response(StatusCode::OK, &user))
}

async fn list_users<S>(store: &S) -> Result<Response>
where
    S: UserStore,
{
    let users = store.list_users().await.map_err(|err| {
        tracing::error!("Failed to scan users: {}", err);
        AppError::StoreFailure(ERR_FAILED_TO_FETCH_RECORD)
    })?;

    tracing::info!("Listing {} users", users.len());
    Ok(api_response(StatusCode::OK, &UserList::from(users)))
}

// POST
pub async fn create_user<S>(State(store): State<Arc<S>>, body: Bytes) -> Result<Response>
where
    S: UserStore,
{
    let user = parse_user(&body, ERR_INVALID_USER_DATA)?;

    if !is_email_valid(&user.email) {
        return Err(AppError::ValidationError(ERR_INVALID_EMAIL));
    }

    // Read-then-write: two concurrent creates for one email can both get past this check
    if lookup_user(store.as_ref(), &user.email).await?.is_some() {
        return Err(AppError::AlreadyExists(ERR_USER_ALREADY_EXISTS));
    }

    save_user(store.as_ref(), &user).await?;
    tracing::info!("Created user {}", user.email);

    Ok(empty_response(StatusCode::CREATED))
}

// PUT   full overwrite of an existing user
pub async fn update_user<S>(State(store): State<Arc<S>>, body: Bytes) -> Result<Response>
where
    S: UserStore,
{
    // Decode failures report "invalid email" here, unlike create
    let user = parse_user(&body, ERR_INVALID_EMAIL)?;

    // An empty key can never have been stored
    if user.email.is_empty() {
        return Err(AppError::NotFound(ERR_USER_DOES_NOT_EXIST));
    }

    if lookup_user(store.as_ref(), &user.email).await?.is_none() {
        return Err(AppError::NotFound(ERR_USER_DOES_NOT_EXIST));
    }

    save_user(store.as_ref(), &user).await?;
    tracing::info!("Updated user {}", user.email);

    // 201 rather than 200, kept for compatibility with existing clients
    Ok(empty_response(StatusCode::CREATED))
}

// DELETE ?email=
pub async fn delete_user<S>(
    State(store): State<Arc<S>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response>
where
    S: UserStore,
{
    // No presence check: a missing email is passed to the store as an empty key
    let email = EmailQuery::from(params).email.unwrap_or_default();
    tracing::info!("Deleting user {:?}", email);

    let deleted = store.delete_user(&email).await.map_err(|err| {
        tracing::error!("Failed to delete user {:?}: {}", email, err);
        AppError::StoreFailure(ERR_COULD_NOT_DELETE_ITEM)
    })?;

    Ok(api_response(StatusCode::OK, &deleted))
}

fn parse_user(body: &[u8], message: &'static str) -> Result<User> {
    serde_json::from_slice(body).map_err(|err| {
        tracing::warn!("Invalid json format: {}", err);
        AppError::InvalidBody(message)
    })
}

// Existence check shared by create and update. Ok(None) means the email is free.
async fn lookup_user<S>(store: &S, email: &str) -> Result<Option<User>>
where
    S: UserStore,
{
    store.get_user(email).await.map_err(|err| {
        tracing::error!("Failed to fetch user {:?}: {}", email, err);
        AppError::StoreFailure(ERR_FAILED_TO_FETCH_RECORD)
    })
}

async fn save_user<S>(store: &S, user: &User) -> Result<()>
where
    S: UserStore,
{
    store.put_user(user).await.map_err(|err| match err {
        StoreError::Serialization(msg) => {
            tracing::error!("Could not marshal item: {}", msg);
            AppError::StoreFailure(ERR_COULD_NOT_MARSHAL_ITEM)
        }
        other => {
            tracing::error!("Put item error: {}", other);
            AppError::StoreFailure(ERR_COULD_NOT_PUT_ITEM)
        }
    })
}
