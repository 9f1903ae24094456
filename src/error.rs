//! Error types for content fetching and request handling.

use crate::views;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

/// Failures talking to the content API.
#[derive(Error, Debug)]
pub enum CmsError {
    /// The request could not be sent or the connection failed
    #[error("Request to {resource} failed: {source}")]
    Request {
        resource: String,
        #[source]
        source: reqwest::Error,
    },
    /// The API answered with a non-success status code
    #[error("{resource} returned {status}")]
    Status { resource: String, status: StatusCode },
    /// The body was not the JSON we expected
    #[error("Invalid response from {resource}: {source}")]
    Decode {
        resource: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Invalid content API URL: {0}")]
    InvalidUrl(String),
    #[error("Received no data from the API.")]
    MissingData,
    #[error("{0} not found")]
    NotFound(String),
}

impl CmsError {
    /// Network failures, rate limits and server errors are worth another try.
    pub fn is_transient(&self) -> bool {
        match self {
            CmsError::Request { .. } => true,
            CmsError::Status { status, .. } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            CmsError::Decode { .. }
            | CmsError::InvalidUrl(_)
            | CmsError::MissingData
            | CmsError::NotFound(_) => false,
        }
    }
}

pub type CmsResult<T> = Result<T, CmsError>;

/// Error returned by page handlers; renders the error page.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Cms(#[from] CmsError),
    #[error("Page not found")]
    NotFound,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Cms(CmsError::NotFound(_)) | AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Cms(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }
        (status, views::error_page(status)).into_response()
    }
}
