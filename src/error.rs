use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::{FormRejection, JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::services::{catalog::CatalogError, marketplace::RankerError};

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    #[error("Item with ID '{0}' not found")]
    ItemNotFound(String),

    #[error("{0}")]
    InvalidFilter(String),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Malformed upload: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Demo data is disabled")]
    DemoUnavailable,
}

impl AppError {
    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidCategory(_) => "invalid_category",
            AppError::ItemNotFound(_) => "item_not_found",
            AppError::InvalidFilter(_) => "invalid_filter",
            AppError::InvalidInput(_) | AppError::Multipart(_) => "invalid_input",
            AppError::ExternalApi(_) | AppError::HttpClient(_) => "external_api",
            AppError::DemoUnavailable => "demo_unavailable",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidCategory(_)
            | AppError::InvalidFilter(_)
            | AppError::InvalidInput(_)
            | AppError::Multipart(_) => StatusCode::BAD_REQUEST,
            AppError::ItemNotFound(_) | AppError::DemoUnavailable => StatusCode::NOT_FOUND,
            AppError::ExternalApi(_) | AppError::HttpClient(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::InvalidCategory(invalid) => AppError::InvalidCategory(invalid.0),
            CatalogError::ItemNotFound(id) => AppError::ItemNotFound(id),
        }
    }
}

impl From<RankerError> for AppError {
    fn from(err: RankerError) -> Self {
        match err {
            RankerError::InvalidFilter { .. } => AppError::InvalidFilter(err.to_string()),
        }
    }
}

/// Extractor rejections become structured `invalid_input` errors
macro_rules! impl_from_rejection {
    ($($rejection:ty),*) => {
        $(
            impl From<$rejection> for AppError {
                fn from(rejection: $rejection) -> Self {
                    AppError::InvalidInput(rejection.body_text())
                }
            }
        )*
    };
}

impl_from_rejection!(JsonRejection, QueryRejection, FormRejection, MultipartRejection);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() || status == StatusCode::BAD_GATEWAY {
            tracing::error!(error = %self, "Request failed");
        }

        let body = Json(json!({
            "success": false,
            "error": self.to_string(),
            "code": self.code(),
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InvalidCategory;

    #[test]
    fn test_catalog_errors_map_to_distinct_codes() {
        let invalid: AppError = CatalogError::InvalidCategory(InvalidCategory("hats".to_string())).into();
        assert_eq!(invalid.code(), "invalid_category");
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
        assert_eq!(invalid.to_string(), "Invalid category: hats");

        let missing: AppError = CatalogError::ItemNotFound("abc".to_string()).into();
        assert_eq!(missing.code(), "item_not_found");
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_ranker_error_maps_to_invalid_filter() {
        let err: AppError = RankerError::InvalidFilter {
            field: "min_price".to_string(),
            reason: "expected a number".to_string(),
        }
        .into();
        assert_eq!(err.code(), "invalid_filter");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains("min_price"));
    }

    #[test]
    fn test_external_errors_are_bad_gateway() {
        let err = AppError::ExternalApi("quota exceeded".to_string());
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_demo_unavailable_is_not_found() {
        let err = AppError::DemoUnavailable;
        assert_eq!(err.code(), "demo_unavailable");
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_json_rejection_maps_to_invalid_input() {
        use axum::{body::Body, extract::FromRequest, http::Request};

        let request = Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let rejection = Json::<serde_json::Value>::from_request(request, &())
            .await
            .unwrap_err();

        let err: AppError = rejection.into();
        assert_eq!(err.code(), "invalid_input");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
