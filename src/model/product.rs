//! The persisted product record.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Soft-delete tag. Inactive records stay in storage but are invisible to reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProductState {
    Active,
    Inactive,
}

impl ProductState {
    pub fn from_flag(is_active: bool) -> Self {
        if is_active {
            ProductState::Active
        } else {
            ProductState::Inactive
        }
    }

    pub fn is_active(self) -> bool {
        matches!(self, ProductState::Active)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub quantity: i32,
    pub category: String,
    pub state: ProductState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }
}

/// A product that has not been stored yet: no id, no timestamps.
#[derive(Clone, Debug, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub quantity: i32,
    pub category: String,
}

impl NewProduct {
    /// Materializes the record with storage-assigned id and creation time.
    pub fn into_product(self, id: i32, now: DateTime<Utc>) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            quantity: self.quantity,
            category: self.category,
            state: ProductState::Active,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_product_starts_active_with_equal_timestamps() {
        let now = Utc::now();
        let p = NewProduct {
            name: "Widget".into(),
            description: String::new(),
            price: Decimal::new(999, 2),
            quantity: 5,
            category: "Tools".into(),
        }
        .into_product(3, now);
        assert_eq!(p.id, 3);
        assert!(p.is_active());
        assert_eq!(p.created_at, p.updated_at);
    }

    #[test]
    fn state_round_trips_flag() {
        assert_eq!(ProductState::from_flag(true), ProductState::Active);
        assert!(!ProductState::from_flag(false).is_active());
    }
}
