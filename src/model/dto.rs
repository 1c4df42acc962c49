//! Transfer shapes and the field-by-field translations to and from [`Product`].

use super::product::{NewProduct, Product};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub quantity: i32,
    pub category: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of a create request. Missing fields default so validation can report them by name.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateProductDto {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub quantity: i32,
    pub category: String,
}

/// Body of an update request; every mutable field is overwritten.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateProductDto {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub quantity: i32,
    pub category: String,
}

impl From<Product> for ProductDto {
    fn from(p: Product) -> Self {
        let is_active = p.is_active();
        ProductDto {
            id: p.id,
            name: p.name,
            description: p.description,
            price: p.price,
            quantity: p.quantity,
            category: p.category,
            is_active,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

impl From<CreateProductDto> for NewProduct {
    fn from(dto: CreateProductDto) -> Self {
        NewProduct {
            name: dto.name,
            description: dto.description,
            price: dto.price,
            quantity: dto.quantity,
            category: dto.category,
        }
    }
}

impl Product {
    /// Overwrites the mutable fields. Id, state and timestamps are left to storage.
    pub fn apply_update(&mut self, dto: UpdateProductDto) {
        self.name = dto.name;
        self.description = dto.description;
        self.price = dto.price;
        self.quantity = dto.quantity;
        self.category = dto.category;
    }
}
