//! Persistence gateway for product records.
//!
//! Every read here is active-only: an inactive (soft-deleted) record is never returned,
//! counted as existing, or listed.

mod memory;
mod postgres;

pub use memory::InMemoryProductRepository;
pub use postgres::{ensure_database_exists, PgProductRepository};

use crate::error::AppError;
use crate::model::{NewProduct, Product};
use async_trait::async_trait;

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Active products ordered by name (ties by id).
    async fn list(&self) -> Result<Vec<Product>, AppError>;

    async fn get_by_id(&self, id: i32) -> Result<Option<Product>, AppError>;

    /// Stores a new active product; id and timestamps are assigned here.
    async fn create(&self, product: NewProduct) -> Result<Product, AppError>;

    /// Overwrites every mutable field and moves `updated_at` forward.
    async fn update(&self, product: &Product) -> Result<Product, AppError>;

    /// Flips an active record to inactive. Absent or already inactive ids are a no-op.
    async fn delete(&self, id: i32) -> Result<(), AppError>;

    async fn exists(&self, id: i32) -> Result<bool, AppError>;

    /// Exact, case-sensitive category match.
    async fn list_by_category(&self, category: &str) -> Result<Vec<Product>, AppError>;

    async fn list_active(&self) -> Result<Vec<Product>, AppError>;

    /// Number of stored rows regardless of state. Used to decide on seeding.
    async fn count_all(&self) -> Result<u64, AppError>;

    /// Connectivity probe for readiness checks.
    async fn ping(&self) -> Result<(), AppError>;
}
