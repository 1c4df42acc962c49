//! SQL text for the products table.

mod builder;
pub use builder::{quoted, qualified_table, ProductSql, PRODUCT_COLUMNS};
