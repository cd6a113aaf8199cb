use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::client::DataClientError;

/// Request-time failures. Startup failures (`ConfigError`,
/// `DataClientError` during connect/authenticate) are handled in `main`
/// and never reach a response.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("not found")]
    NotFound,

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("upstream error: {0}")]
    Upstream(String),

    #[error("render error: {0}")]
    Render(#[from] askama::Error),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DataClientError> for AppError {
    fn from(err: DataClientError) -> Self {
        match err {
            DataClientError::NotFound => AppError::NotFound,
            other => AppError::Upstream(other.to_string()),
        }
    }
}

/// API routes answer with a JSON error body.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Error type for the page routes: browsers get a minimal HTML body
/// instead of the API's JSON shape.
#[derive(Debug)]
pub struct PageError(pub AppError);

impl From<AppError> for PageError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<askama::Error> for PageError {
    fn from(err: askama::Error) -> Self {
        Self(AppError::Render(err))
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = self.0.status();
        let reason = status.canonical_reason().unwrap_or("Error");

        let body = format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head><title>{reason}</title></head>\n\
             <body><h1>{reason}</h1><p><a href=\"/hiscores\">Back to the hiscores</a></p></body>\n</html>"
        );

        (status, Html(body)).into_response()
    }
}
