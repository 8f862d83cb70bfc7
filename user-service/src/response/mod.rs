use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, HeaderValue, StatusCode},
    response::Response,
};
use serde::Serialize;

const APPLICATION_JSON: &str = "application/json";

/// Wraps a status and a JSON body into the uniform response envelope.
///
/// A body that fails to serialize is replaced by an empty one; the failure is only logged.
pub fn api_response<T>(status: StatusCode, body: &T) -> Response
where
    T: Serialize + ?Sized,
{
    let bytes = match serde_json::to_vec(body) {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::warn!("Failed to serialize response body: {}", err);
            Vec::new()
        }
    };
    envelope(status, Body::from(bytes))
}

/// Envelope with no body at all, used for create and update
pub fn empty_response(status: StatusCode) -> Response {
    envelope(status, Body::empty())
}

fn envelope(status: StatusCode, body: Body) -> Response {
    let mut response = Response::new(body);
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::ser::Error as _;
    use serde::Serializer;
    use user_crud_shared::test_utils::http_test_utils::{response_to_bytes, response_to_json};

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: Serializer>(&self, _serializer: S) -> std::result::Result<S::Ok, S::Error> {
            Err(S::Error::custom("nope"))
        }
    }

    #[tokio::test]
    async fn test_api_response_sets_status_and_content_type() {
        let response = api_response(StatusCode::OK, &serde_json::json!({ "email": "a@b.co" }));

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], APPLICATION_JSON);
        let body = response_to_json(response).await;
        assert_eq!(body["email"], "a@b.co");
    }

    #[tokio::test]
    async fn test_serialization_failure_gives_empty_body() {
        let response = api_response(StatusCode::OK, &Unserializable);

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response_to_bytes(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_empty_response() {
        let response = empty_response(StatusCode::CREATED);

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()[CONTENT_TYPE], APPLICATION_JSON);
        assert!(response_to_bytes(response).await.is_empty());
    }
}
