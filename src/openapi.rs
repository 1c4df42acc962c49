//! OpenAPI description of the product routes.

use crate::handlers::product;
use crate::model::{CreateProductDto, ProductDto, UpdateProductDto};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "Product Catalog API", description = "Product CRUD with soft delete and a uniform response envelope"),
    paths(
        product::list_products,
        product::get_product,
        product::create_product,
        product::update_product,
        product::delete_product,
        product::list_products_by_category,
        product::list_active_products,
    ),
    components(schemas(ProductDto, CreateProductDto, UpdateProductDto)),
    tags((name = "products", description = "Product lifecycle"))
)]
pub struct ApiDoc;
