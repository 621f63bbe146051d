use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::models::MetricParseError;

/// An error type for the backend

#[derive(Debug)]
pub enum AppError {

    /// A request the views can't answer, such as an unknown impact metric.
    /// Translates to http status code `400 Bad Request`.

    BadRequest(String),

    /// A generic, unrecoverable error. Translates to http status code `500
    /// Internal Server Error`.
    ///
    /// This error will cause frontend charts to enter a fail state and display
    /// "an error occurred". This state requires a reload.

    GenericError,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                message,
            ),
            AppError::GenericError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "something went wrong - please refresh the page and try again".to_owned(),
            ),
        };

        (status, message).into_response()
    }
}

impl From<MetricParseError> for AppError {
    fn from(e: MetricParseError) -> Self {
        Self::BadRequest(e.to_string())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(_: tokio::task::JoinError) -> Self {
        Self::GenericError
    }
}
