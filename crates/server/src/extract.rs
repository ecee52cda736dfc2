use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::{ApiError, INVALID_JSON};

/// JSON body extractor that tolerates what browsers and scripts actually send.
///
/// - no `Content-Type` requirement
/// - empty body, or a JSON value that is not an object, yields `T::default()`
/// - syntactically invalid JSON is a 400
pub struct LenientJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for LenientJson<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::new(e.status(), e.body_text()))?;
        parse_body(&bytes).map(LenientJson)
    }
}

fn parse_body<T>(bytes: &[u8]) -> Result<T, ApiError>
where
    T: DeserializeOwned + Default,
{
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    match serde_json::from_slice::<Value>(bytes) {
        Ok(v @ Value::Object(_)) => {
            serde_json::from_value(v).map_err(|_| ApiError::bad_request(INVALID_JSON))
        }
        Ok(_) => Ok(T::default()),
        Err(_) => Err(ApiError::bad_request(INVALID_JSON)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use models::todo::{CreateTodo, UpdateTodo};

    #[test]
    fn empty_and_non_object_bodies_default() {
        for body in ["", "  \n", "[]", "\"hi\"", "null", "3"] {
            let parsed: UpdateTodo = parse_body(body.as_bytes()).unwrap();
            assert_eq!(parsed, UpdateTodo::default(), "body {body:?}");
        }
    }

    #[test]
    fn object_body_parses_known_fields() {
        let parsed: CreateTodo = parse_body(br#"{"title":"x","other":1}"#).unwrap();
        assert_eq!(parsed.title.as_deref(), Some("x"));
    }

    #[test]
    fn malformed_json_is_bad_request() {
        let err = parse_body::<CreateTodo>(b"{\"title\": ").unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, INVALID_JSON);
    }
}
