//! Typed errors and HTTP mapping.

use crate::response;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid setting {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Field name -> violation messages, in field order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(|v| v.as_slice())
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(|k| k.as_str())
    }

    pub fn field_list(&self) -> String {
        self.fields().collect::<Vec<_>>().join(", ")
    }

    /// `Ok(())` when no field was flagged, otherwise the collected errors.
    pub fn into_result(self) -> Result<(), AppError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self))
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("validation failed on {}", .0.field_list())]
    Validation(FieldErrors),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("storage: {0}")]
    Storage(String),
    #[error("storage call timed out after {0:?}")]
    Timeout(Duration),
    #[error("bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Storage-class failures are the only errors treated as server faults.
    pub fn is_fault(&self) -> bool {
        matches!(
            self,
            AppError::Config(_) | AppError::Db(_) | AppError::Storage(_) | AppError::Timeout(_)
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(errors) => {
                tracing::debug!(fields = %errors.field_list(), "request rejected by validation");
                response::validation_error(errors).into_response()
            }
            AppError::NotFound(message) => response::error(message, 404).into_response(),
            AppError::BadRequest(message) => response::error(message, 400).into_response(),
            fault => {
                tracing::error!(error = %fault, "request failed");
                response::error("An internal error occurred while processing the request", 500)
                    .into_response()
            }
        }
    }
}
