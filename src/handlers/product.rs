//! Product handlers: each one calls the lifecycle service once and wraps the result in the envelope.

use crate::error::AppError;
use crate::model::{CreateProductDto, ProductDto, UpdateProductDto};
use crate::response;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

fn parse_id(id_str: &str) -> Result<i32, AppError> {
    id_str
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid product id '{}'", id_str)))
}

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    body.map(|Json(v)| v)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

#[utoipa::path(
    get,
    path = "/products",
    tag = "products",
    responses((status = 200, description = "Envelope whose data is every active product, by name", body = [ProductDto]))
)]
pub async fn list_products(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let products = state.products.list_all().await?;
    Ok(response::success(products, "Products retrieved successfully"))
}

#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "products",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Envelope whose data is the product", body = ProductDto),
        (status = 404, description = "No active product with this id")
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let product = state
        .products
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product with ID {} not found", id)))?;
    Ok(response::success(product, "Product retrieved successfully"))
}

#[utoipa::path(
    post,
    path = "/products",
    tag = "products",
    request_body = CreateProductDto,
    responses(
        (status = 201, description = "Envelope whose data is the created product", body = ProductDto),
        (status = 400, description = "Validation failed; data maps field names to messages")
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    body: Result<Json<CreateProductDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let input = json_body(body)?;
    let product = state.products.create(input).await?;
    let location = format!("/products/{}", product.id);
    let (status, envelope) = response::created(product, "Product created successfully");
    Ok((status, [(header::LOCATION, location)], envelope))
}

#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "products",
    params(("id" = i32, Path, description = "Product id")),
    request_body = UpdateProductDto,
    responses(
        (status = 200, description = "Envelope whose data is the updated product", body = ProductDto),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "No active product with this id")
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Result<Json<UpdateProductDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let input = json_body(body)?;
    let product = state.products.update(id, input).await?;
    Ok(response::success(product, "Product updated successfully"))
}

#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "products",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 204, description = "Product soft-deleted"),
        (status = 404, description = "No active product with this id")
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    state.products.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/products/category/{category}",
    tag = "products",
    params(("category" = String, Path, description = "Exact, case-sensitive category")),
    responses((status = 200, description = "Envelope whose data is the active products in the category", body = [ProductDto]))
)]
pub async fn list_products_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let products = state.products.list_by_category(&category).await?;
    let message = format!("Products in category '{}' retrieved successfully", category);
    Ok(response::success(products, message))
}

#[utoipa::path(
    get,
    path = "/products/active",
    tag = "products",
    responses((status = 200, description = "Envelope whose data is every active product", body = [ProductDto]))
)]
pub async fn list_active_products(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let products = state.products.list_active().await?;
    Ok(response::success(products, "Active products retrieved successfully"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_must_be_integers() {
        assert_eq!(parse_id("3").unwrap(), 3);
        assert_eq!(parse_id(" 42 ").unwrap(), 42);
        assert!(matches!(parse_id("abc"), Err(AppError::BadRequest(_))));
        assert!(matches!(parse_id("99999999999"), Err(AppError::BadRequest(_))));
    }
}
