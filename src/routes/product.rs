//! Product CRUD routes.
//! `/products/active` and `/products/category/:category` are static segments and win over `/products/:id`.

use crate::handlers::product::{
    create_product, delete_product, get_product, list_active_products, list_products,
    list_products_by_category, update_product,
};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn product_routes(state: AppState) -> Router {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route("/products/active", get(list_active_products))
        .route("/products/category/:category", get(list_products_by_category))
        .route(
            "/products/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(state)
}
