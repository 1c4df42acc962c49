//! In-process gateway. Backs `STORAGE_BACKEND=memory` and the test suite.

use super::ProductRepository;
use crate::error::AppError;
use crate::model::{NewProduct, Product, ProductState};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Table {
    next_id: i32,
    rows: BTreeMap<i32, Product>,
}

#[derive(Clone, Default)]
pub struct InMemoryProductRepository {
    table: Arc<RwLock<Table>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Table>, AppError> {
        self.table
            .read()
            .map_err(|_| AppError::Storage("product table lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Table>, AppError> {
        self.table
            .write()
            .map_err(|_| AppError::Storage("product table lock poisoned".into()))
    }

    fn active_sorted<F>(&self, predicate: F) -> Result<Vec<Product>, AppError>
    where
        F: Fn(&Product) -> bool,
    {
        let table = self.read()?;
        let mut out: Vec<Product> = table
            .rows
            .values()
            .filter(|p| p.is_active() && predicate(p))
            .cloned()
            .collect();
        out.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(out)
    }
}

/// Strictly after `previous`, even when the wall clock has not advanced.
fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list(&self) -> Result<Vec<Product>, AppError> {
        self.active_sorted(|_| true)
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Product>, AppError> {
        let table = self.read()?;
        Ok(table.rows.get(&id).filter(|p| p.is_active()).cloned())
    }

    async fn create(&self, product: NewProduct) -> Result<Product, AppError> {
        let mut table = self.write()?;
        table.next_id += 1;
        let id = table.next_id;
        let stored = product.into_product(id, Utc::now());
        table.rows.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, product: &Product) -> Result<Product, AppError> {
        let mut table = self.write()?;
        let row = table
            .rows
            .get_mut(&product.id)
            .filter(|p| p.is_active())
            .ok_or_else(|| AppError::NotFound(format!("Product with ID {} not found", product.id)))?;
        row.name = product.name.clone();
        row.description = product.description.clone();
        row.price = product.price;
        row.quantity = product.quantity;
        row.category = product.category.clone();
        row.updated_at = next_timestamp(row.updated_at);
        Ok(row.clone())
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        let mut table = self.write()?;
        if let Some(row) = table.rows.get_mut(&id).filter(|p| p.is_active()) {
            row.state = ProductState::Inactive;
            row.updated_at = next_timestamp(row.updated_at);
        }
        Ok(())
    }

    async fn exists(&self, id: i32) -> Result<bool, AppError> {
        let table = self.read()?;
        Ok(table.rows.get(&id).is_some_and(|p| p.is_active()))
    }

    async fn list_by_category(&self, category: &str) -> Result<Vec<Product>, AppError> {
        self.active_sorted(|p| p.category == category)
    }

    async fn list_active(&self) -> Result<Vec<Product>, AppError> {
        self.active_sorted(|_| true)
    }

    async fn count_all(&self) -> Result<u64, AppError> {
        Ok(self.read()?.rows.len() as u64)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.read().map(|_| ())
    }
}
