use std::collections::HashMap;

/// Query string shared by GET and DELETE.
///
/// Built from a plain key/value map so a repeated `email` never rejects the request; the
/// last occurrence wins.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EmailQuery {
    pub email: Option<String>,
}

impl From<HashMap<String, String>> for EmailQuery {
    fn from(mut params: HashMap<String, String>) -> Self {
        Self {
            email: params.remove("email"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::http::Uri;

    fn parse(uri: &str) -> EmailQuery {
        let uri: Uri = uri.parse().unwrap();
        let Query(params) = Query::<HashMap<String, String>>::try_from_uri(&uri).unwrap();
        EmailQuery::from(params)
    }

    #[test]
    fn test_email_present_absent_and_empty() {
        assert_eq!(parse("/?email=a@b.com").email.as_deref(), Some("a@b.com"));
        assert_eq!(parse("/").email, None);
        assert_eq!(parse("/?email=").email.as_deref(), Some(""));
    }

    #[test]
    fn test_repeated_email_keeps_last_value() {
        assert_eq!(
            parse("/?email=a@b.com&email=c@d.com").email.as_deref(),
            Some("c@d.com")
        );
    }
}
