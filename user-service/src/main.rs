mod error;
mod handlers;
mod models;
mod response;
mod routes;

#[cfg(test)]
mod tests;

use axum::{body::Body, extract::Request, response::Response, Router};
use lambda_http::{
    run, service_fn, Body as LambdaBody, Error, Request as LambdaRequest,
    Response as LambdaResponse,
};
use tower::ServiceExt;

// The Lambda handler function
async fn function_handler(
    app: Router,
    event: LambdaRequest,
) -> Result<LambdaResponse<LambdaBody>, Error> {
    tracing::info!(
        "Received Lambda request: method={:?}, path={:?}, query_params={:?}",
        event.method(),
        event.uri().path(),
        event.uri().query()
    );

    // Convert the Lambda event to an HTTP request for Axum
    let (parts, body) = event.into_parts();
    let body = match body {
        LambdaBody::Empty => Body::empty(),
        LambdaBody::Text(text) => {
            tracing::debug!("Request body (text): {}", text);
            Body::from(text)
        }
        LambdaBody::Binary(data) => {
            tracing::debug!("Request body (binary): {} bytes", data.len());
            Body::from(data)
        }
    };

    let http_request = Request::from_parts(parts, body);

    let response = match app.oneshot(http_request).await {
        Ok(response) => response,
        Err(err) => {
            tracing::error!("Error from Axum router: {:?}", err);
            return Err(err.into());
        }
    };

    let lambda_response = response_to_lambda(response).await?;
    tracing::info!(
        "Returning Lambda response: status={}",
        lambda_response.status()
    );

    Ok(lambda_response)
}

// Convert the Axum response to a format suitable for Lambda
async fn response_to_lambda(response: Response) -> Result<LambdaResponse<LambdaBody>, Error> {
    let (parts, body) = response.into_parts();

    let bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::error!("Failed to read response body: {:?}", err);
            return Err(err.into());
        }
    };

    let builder = parts
        .headers
        .iter()
        .fold(LambdaResponse::builder().status(parts.status), |builder, (name, value)| {
            builder.header(name.as_str(), value.as_bytes())
        });

    // API Gateway wants JSON as text; anything else goes out base64-encoded
    let lambda_body = if bytes.is_empty() {
        LambdaBody::Empty
    } else {
        match String::from_utf8(bytes.to_vec()) {
            Ok(text) => LambdaBody::Text(text),
            Err(err) => LambdaBody::Binary(err.into_bytes()),
        }
    };

    Ok(builder.body(lambda_body)?)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let log_level =
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info,user_crud_service=debug".into());

    tracing_subscriber::fmt()
        .with_env_filter(log_level.as_str())
        .with_ansi(false) // Disable ANSI colors in Lambda environment
        .with_target(true)
        .init();

    tracing::info!("Logging initialized at level: {}", log_level);

    if let Ok(function_name) = std::env::var("AWS_LAMBDA_FUNCTION_NAME") {
        tracing::info!(
            "Starting AWS Lambda function: {} (version: {})",
            function_name,
            std::env::var("AWS_LAMBDA_FUNCTION_VERSION").unwrap_or_else(|_| "unknown".into())
        );
    } else {
        tracing::info!("Starting service in non-Lambda environment");
    }

    // Built once per cold start and shared by every invocation
    let app = match routes::create_router().await {
        Ok(app) => app,
        Err(err) => {
            tracing::error!("Failed to configure user store: {}", err);
            return Err(err.into());
        }
    };

    run(service_fn(move |event: LambdaRequest| {
        let app = app.clone();
        async move { function_handler(app, event).await }
    }))
    .await
}
