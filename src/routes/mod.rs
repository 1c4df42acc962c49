//! Router assembly: common routes, product routes and the HTTP layers around them.

mod common;
mod product;

pub use common::common_routes;
pub use product::product_routes;

use crate::response::ApiResponse;
use crate::state::AppState;
use axum::http::StatusCode;
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

pub const PAYLOAD_TOO_LARGE_MESSAGE: &str = "Request body is too large";

/// Full application router with body limit, permissive CORS and request tracing.
/// Cors must sit directly on the routes: it needs a `Default` response body.
pub fn app_router(state: AppState, body_limit_bytes: usize) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(product_routes(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(body_limit_bytes))
                .layer(CorsLayer::permissive()),
        )
        .layer(middleware::map_response(envelope_payload_too_large))
}

/// The body limit answers 413 in plain text; rewrap it as an error envelope.
async fn envelope_payload_too_large(res: Response) -> Response {
    if res.status() != StatusCode::PAYLOAD_TOO_LARGE {
        return res;
    }
    tracing::debug!("request body over limit");
    (
        StatusCode::PAYLOAD_TOO_LARGE,
        Json(ApiResponse::failure(PAYLOAD_TOO_LARGE_MESSAGE)),
    )
        .into_response()
}
