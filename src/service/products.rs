//! Product lifecycle service over a [`ProductRepository`].

use super::ProductValidator;
use crate::error::AppError;
use crate::model::{CreateProductDto, NewProduct, ProductDto, UpdateProductDto};
use crate::store::ProductRepository;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Product with ID {} not found", id))
}

/// Holds no state beyond the gateway handle; clones share the same gateway.
#[derive(Clone)]
pub struct ProductService {
    repo: Arc<dyn ProductRepository>,
    timeout: Option<Duration>,
}

impl ProductService {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        ProductService { repo, timeout: None }
    }

    /// Bound every gateway call; an expired call is dropped and reported as a storage error.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    async fn call<T, F>(&self, fut: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, AppError>>,
    {
        match self.timeout {
            None => fut.await,
            Some(limit) => tokio::time::timeout(limit, fut)
                .await
                .map_err(|_| AppError::Timeout(limit))?,
        }
    }

    pub async fn list_all(&self) -> Result<Vec<ProductDto>, AppError> {
        let rows = self.call(self.repo.list()).await?;
        Ok(rows.into_iter().map(ProductDto::from).collect())
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<ProductDto>, AppError> {
        let row = self.call(self.repo.get_by_id(id)).await?;
        Ok(row.map(ProductDto::from))
    }

    pub async fn create(&self, input: CreateProductDto) -> Result<ProductDto, AppError> {
        ProductValidator::validate_create(&input)?;
        let created = self.call(self.repo.create(NewProduct::from(input))).await?;
        tracing::info!(id = created.id, "product created");
        Ok(ProductDto::from(created))
    }

    /// Validation runs before the existence check.
    pub async fn update(&self, id: i32, input: UpdateProductDto) -> Result<ProductDto, AppError> {
        ProductValidator::validate_update(&input)?;
        let mut existing = self
            .call(self.repo.get_by_id(id))
            .await?
            .ok_or_else(|| not_found(id))?;
        existing.apply_update(input);
        let updated = self.call(self.repo.update(&existing)).await?;
        tracing::info!(id, "product updated");
        Ok(ProductDto::from(updated))
    }

    /// Soft delete. Deleting an already deleted product is not found.
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !self.call(self.repo.exists(id)).await? {
            return Err(not_found(id));
        }
        self.call(self.repo.delete(id)).await?;
        tracing::info!(id, "product deleted");
        Ok(())
    }

    /// Exact, case-sensitive match on category.
    pub async fn list_by_category(&self, category: &str) -> Result<Vec<ProductDto>, AppError> {
        let rows = self.call(self.repo.list_by_category(category)).await?;
        Ok(rows.into_iter().map(ProductDto::from).collect())
    }

    pub async fn list_active(&self) -> Result<Vec<ProductDto>, AppError> {
        let rows = self.call(self.repo.list_active()).await?;
        Ok(rows.into_iter().map(ProductDto::from).collect())
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        self.call(self.repo.ping()).await
    }
}
