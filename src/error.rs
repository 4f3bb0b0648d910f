//! Typed errors and HTTP mapping.

use crate::response::{error_body, validation_errors_body};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Generic message returned for every rejected create request.
pub const VALIDATION_ERRORS: &str = "Validation errors";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Why a restaurant_pizzas create was rejected. Only logged; the response body stays generic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("request body is not a JSON object: {0}")]
    MalformedBody(String),
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("{0} must be an integer")]
    NotAnInteger(&'static str),
    #[error("price must be between {min} and {max}, got {got}")]
    PriceOutOfRange { min: i64, max: i64, got: i64 },
    #[error("pizza {0} not found")]
    PizzaNotFound(i32),
    #[error("restaurant {0} not found")]
    RestaurantNotFound(i32),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("validation: {0}")]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Db(#[from] sqlx::Error),
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn restaurant_not_found() -> Self {
        AppError::NotFound("Restaurant")
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(_) => {
                (StatusCode::NOT_FOUND, Json(error_body(self.to_string()))).into_response()
            }
            AppError::Validation(cause) => {
                tracing::debug!(%cause, "rejected restaurant_pizza");
                (
                    StatusCode::BAD_REQUEST,
                    Json(validation_errors_body(&[VALIDATION_ERRORS])),
                )
                    .into_response()
            }
            AppError::Db(_) | AppError::Internal(_) => {
                tracing::error!(error = %self, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(error_body(self.to_string())),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_entity() {
        assert_eq!(AppError::restaurant_not_found().to_string(), "Restaurant not found");
    }

    #[test]
    fn status_codes() {
        assert_eq!(
            AppError::restaurant_not_found().into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(ValidationError::PizzaNotFound(9)).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Db(sqlx::Error::PoolTimedOut).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Internal("store lock poisoned".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
