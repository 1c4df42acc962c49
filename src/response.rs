//! Standard response envelope helpers.

use crate::error::FieldErrors;
use axum::{http::StatusCode, Json};
use serde::Serialize;

pub const DEFAULT_SUCCESS_MESSAGE: &str = "Success";
pub const VALIDATION_FAILED_MESSAGE: &str = "Validation failed";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        ApiResponse {
            success: true,
            message: message.into(),
            data: Some(data),
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

impl ApiResponse<()> {
    pub fn failure(message: impl Into<String>) -> Self {
        ApiResponse {
            success: false,
            message: message.into(),
            data: None,
            metadata: None,
        }
    }
}

/// Envelope for one page of a larger result set.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    pub page_number: u32,
    pub page_size: u32,
    pub total_count: u64,
    pub total_pages: u64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

/// Maps the small set of supported codes to a status; anything else is a bad request.
pub fn status_for_code(code: u16) -> StatusCode {
    match code {
        400 => StatusCode::BAD_REQUEST,
        401 => StatusCode::UNAUTHORIZED,
        403 => StatusCode::FORBIDDEN,
        404 => StatusCode::NOT_FOUND,
        500 => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_REQUEST,
    }
}

pub fn success<T: Serialize>(data: T, message: impl Into<String>) -> (StatusCode, Json<ApiResponse<T>>) {
    (StatusCode::OK, Json(ApiResponse::ok(data, message)))
}

pub fn created<T: Serialize>(data: T, message: impl Into<String>) -> (StatusCode, Json<ApiResponse<T>>) {
    (StatusCode::CREATED, Json(ApiResponse::ok(data, message)))
}

pub fn error(message: impl Into<String>, code: u16) -> (StatusCode, Json<ApiResponse<()>>) {
    (status_for_code(code), Json(ApiResponse::failure(message)))
}

pub fn validation_error(errors: FieldErrors) -> (StatusCode, Json<ApiResponse<FieldErrors>>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse {
            success: false,
            message: VALIDATION_FAILED_MESSAGE.to_string(),
            data: Some(errors),
            metadata: None,
        }),
    )
}

pub fn paginated<T: Serialize>(
    items: Vec<T>,
    page_number: u32,
    page_size: u32,
    total_count: u64,
    message: impl Into<String>,
) -> (StatusCode, Json<PaginatedResponse<T>>) {
    let total_pages = if page_size == 0 {
        0
    } else {
        total_count.div_ceil(u64::from(page_size))
    };
    (
        StatusCode::OK,
        Json(PaginatedResponse {
            success: true,
            message: message.into(),
            data: items,
            metadata: None,
            page_number,
            page_size,
            total_count,
            total_pages,
            has_next_page: u64::from(page_number) < total_pages,
            has_previous_page: page_number > 1,
        }),
    )
}
