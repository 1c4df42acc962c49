//! Product catalog: a layered CRUD backend for product records with soft delete.
//!
//! Requests flow HTTP handler → [`ProductService`] → [`ProductRepository`] → storage, and every
//! response body is wrapped in the [`response::ApiResponse`] envelope.

pub mod config;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod openapi;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{Settings, StorageBackend};
pub use error::{AppError, ConfigError, FieldErrors};
pub use migration::{apply_migrations, seed_sample_data};
pub use model::{CreateProductDto, NewProduct, Product, ProductDto, ProductState, UpdateProductDto};
pub use response::{created, error as error_response, paginated, success, validation_error, ApiResponse, PaginatedResponse};
pub use routes::{app_router, common_routes, product_routes};
pub use service::ProductService;
pub use state::AppState;
pub use store::{ensure_database_exists, InMemoryProductRepository, PgProductRepository, ProductRepository};
