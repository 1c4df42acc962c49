// tests/common/mod.rs
#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use product_catalog::{
    app_router, AppError, AppState, CreateProductDto, InMemoryProductRepository, NewProduct, Product,
    ProductRepository, ProductService, UpdateProductDto,
};
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

pub const BODY_LIMIT: usize = 64 * 1024;

pub fn memory_service() -> ProductService {
    ProductService::new(Arc::new(InMemoryProductRepository::new()))
}

pub fn memory_app() -> Router {
    app_router(AppState::new(memory_service()), BODY_LIMIT)
}

pub fn widget() -> CreateProductDto {
    CreateProductDto {
        name: "Widget".into(),
        description: String::new(),
        price: Decimal::new(999, 2),
        quantity: 5,
        category: "Tools".into(),
    }
}

pub fn product_input(name: &str, category: &str) -> CreateProductDto {
    CreateProductDto {
        name: name.into(),
        description: format!("{} description", name),
        price: Decimal::new(1250, 2),
        quantity: 10,
        category: category.into(),
    }
}

pub fn update_input(name: &str) -> UpdateProductDto {
    UpdateProductDto {
        name: name.into(),
        description: "updated".into(),
        price: Decimal::new(2000, 2),
        quantity: 7,
        category: "Gadgets".into(),
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> (Response<Body>, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let (parts, body) = response.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| serde_json::Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (Response::from_parts(parts, Body::empty()), json)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder().method("DELETE").uri(uri).body(Body::empty()).unwrap()
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Gateway whose every call fails like a lost database connection.
pub struct FailingRepository;

fn down() -> AppError {
    AppError::Storage("connection refused".into())
}

#[async_trait]
impl ProductRepository for FailingRepository {
    async fn list(&self) -> Result<Vec<Product>, AppError> {
        Err(down())
    }
    async fn get_by_id(&self, _id: i32) -> Result<Option<Product>, AppError> {
        Err(down())
    }
    async fn create(&self, _product: NewProduct) -> Result<Product, AppError> {
        Err(down())
    }
    async fn update(&self, _product: &Product) -> Result<Product, AppError> {
        Err(down())
    }
    async fn delete(&self, _id: i32) -> Result<(), AppError> {
        Err(down())
    }
    async fn exists(&self, _id: i32) -> Result<bool, AppError> {
        Err(down())
    }
    async fn list_by_category(&self, _category: &str) -> Result<Vec<Product>, AppError> {
        Err(down())
    }
    async fn list_active(&self) -> Result<Vec<Product>, AppError> {
        Err(down())
    }
    async fn count_all(&self) -> Result<u64, AppError> {
        Err(down())
    }
    async fn ping(&self) -> Result<(), AppError> {
        Err(down())
    }
}

/// Gateway that answers from memory, but only after a delay.
pub struct SlowRepository {
    pub inner: InMemoryProductRepository,
    pub delay: Duration,
}

#[async_trait]
impl ProductRepository for SlowRepository {
    async fn list(&self) -> Result<Vec<Product>, AppError> {
        tokio::time::sleep(self.delay).await;
        self.inner.list().await
    }
    async fn get_by_id(&self, id: i32) -> Result<Option<Product>, AppError> {
        tokio::time::sleep(self.delay).await;
        self.inner.get_by_id(id).await
    }
    async fn create(&self, product: NewProduct) -> Result<Product, AppError> {
        tokio::time::sleep(self.delay).await;
        self.inner.create(product).await
    }
    async fn update(&self, product: &Product) -> Result<Product, AppError> {
        tokio::time::sleep(self.delay).await;
        self.inner.update(product).await
    }
    async fn delete(&self, id: i32) -> Result<(), AppError> {
        tokio::time::sleep(self.delay).await;
        self.inner.delete(id).await
    }
    async fn exists(&self, id: i32) -> Result<bool, AppError> {
        tokio::time::sleep(self.delay).await;
        self.inner.exists(id).await
    }
    async fn list_by_category(&self, category: &str) -> Result<Vec<Product>, AppError> {
        tokio::time::sleep(self.delay).await;
        self.inner.list_by_category(category).await
    }
    async fn list_active(&self) -> Result<Vec<Product>, AppError> {
        tokio::time::sleep(self.delay).await;
        self.inner.list_active().await
    }
    async fn count_all(&self) -> Result<u64, AppError> {
        self.inner.count_all().await
    }
    async fn ping(&self) -> Result<(), AppError> {
        self.inner.ping().await
    }
}

/// Gateway where a concurrent delete lands right after every read by id.
pub struct RacingDeleteRepository {
    pub inner: InMemoryProductRepository,
}

#[async_trait]
impl ProductRepository for RacingDeleteRepository {
    async fn list(&self) -> Result<Vec<Product>, AppError> {
        self.inner.list().await
    }
    async fn get_by_id(&self, id: i32) -> Result<Option<Product>, AppError> {
        let found = self.inner.get_by_id(id).await?;
        self.inner.delete(id).await?;
        Ok(found)
    }
    async fn create(&self, product: NewProduct) -> Result<Product, AppError> {
        self.inner.create(product).await
    }
    async fn update(&self, product: &Product) -> Result<Product, AppError> {
        self.inner.update(product).await
    }
    async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.inner.delete(id).await
    }
    async fn exists(&self, id: i32) -> Result<bool, AppError> {
        self.inner.exists(id).await
    }
    async fn list_by_category(&self, category: &str) -> Result<Vec<Product>, AppError> {
        self.inner.list_by_category(category).await
    }
    async fn list_active(&self) -> Result<Vec<Product>, AppError> {
        self.inner.list_active().await
    }
    async fn count_all(&self) -> Result<u64, AppError> {
        self.inner.count_all().await
    }
    async fn ping(&self) -> Result<(), AppError> {
        self.inner.ping().await
    }
}
