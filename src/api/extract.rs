//! Extractors whose rejections flow through [`AppError`]
//!
//! axum's stock `Json`, `Query` and `Multipart` reject with plain-text bodies.
//! These wrappers convert every rejection into the structured error envelope.

use std::collections::HashMap;

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Multipart, Query, Request},
    http::{header::CONTENT_TYPE, request::Parts},
    Form, Json,
};
use serde::de::DeserializeOwned;

use crate::error::{AppError, AppResult};

/// `Json<T>` with structured rejections
pub struct AppJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// `Query<T>` with structured rejections
pub struct AppQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for AppQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

/// A multipart body read fully into memory, keyed by field name
///
/// A repeated field keeps its last value.
#[derive(Debug, Default)]
pub struct FormFields(HashMap<String, Bytes>);

impl FormFields {
    async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut fields = HashMap::new();
        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            let data = field.bytes().await?;
            fields.insert(name, data);
        }
        Ok(Self(fields))
    }

    /// A text field, trimmed; blank counts as missing
    pub fn text(&self, name: &str) -> AppResult<Option<String>> {
        match self.0.get(name) {
            None => Ok(None),
            Some(data) => {
                let text = std::str::from_utf8(data)
                    .map_err(|_| AppError::InvalidInput(format!("field '{}' is not valid UTF-8", name)))?
                    .trim();
                Ok((!text.is_empty()).then(|| text.to_string()))
            }
        }
    }

    /// A file field; an empty upload counts as missing
    pub fn file(&self, name: &str) -> Option<Vec<u8>> {
        self.0
            .get(name)
            .filter(|data| !data.is_empty())
            .map(|data| data.to_vec())
    }
}

#[async_trait]
impl<S> FromRequest<S> for FormFields
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let multipart = Multipart::from_request(req, state).await?;
        Self::read(multipart).await
    }
}

pub fn required<T>(value: Option<T>, name: &str) -> AppResult<T> {
    value.ok_or_else(|| AppError::InvalidInput(format!("missing field '{}'", name)))
}

/// Request body accepted as JSON, url-encoded form or multipart form
///
/// The body shape follows the `Content-Type` header.
pub struct JsonOrForm<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    T: DeserializeOwned + FormShape,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("application/json") {
            let AppJson(value) = AppJson::<T>::from_request(req, state).await?;
            Ok(Self(value))
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(form) = Form::<T::Form>::from_request(req, state).await?;
            Ok(Self(T::from_form(form)?))
        } else if content_type.starts_with("multipart/form-data") {
            let fields = FormFields::from_request(req, state).await?;
            Ok(Self(T::from_form(T::form_from_fields(&fields)?)?))
        } else {
            Err(AppError::InvalidInput(
                "Expected a JSON, url-encoded or multipart body".to_string(),
            ))
        }
    }
}

/// A JSON request type that also has a flat form rendition
pub trait FormShape: Sized {
    type Form: DeserializeOwned + Send;

    fn from_form(form: Self::Form) -> AppResult<Self>;

    fn form_from_fields(fields: &FormFields) -> AppResult<Self::Form>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        name: String,
    }

    #[tokio::test]
    async fn test_app_json_rejects_with_invalid_input() {
        let request = Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"other": 1}"#))
            .unwrap();

        let err = AppJson::<Payload>::from_request(request, &())
            .await
            .err()
            .unwrap();
        assert_eq!(err.code(), "invalid_input");
    }

    #[tokio::test]
    async fn test_app_json_accepts_valid_body() {
        let request = Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"name": "scarf"}"#))
            .unwrap();

        let AppJson(payload) = AppJson::<Payload>::from_request(request, &())
            .await
            .ok()
            .unwrap();
        assert_eq!(payload.name, "scarf");
    }

    #[tokio::test]
    async fn test_app_query_rejects_missing_field() {
        let request = Request::builder().uri("/items?other=1").body(()).unwrap();
        let (mut parts, _) = request.into_parts();

        let err = AppQuery::<Payload>::from_request_parts(&mut parts, &())
            .await
            .err()
            .unwrap();
        assert_eq!(err.code(), "invalid_input");
        assert_eq!(
            axum::response::IntoResponse::into_response(err).status(),
            StatusCode::BAD_REQUEST
        );
    }
}
