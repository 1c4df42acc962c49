//! Product record and its transfer shapes.

pub mod dto;
pub mod product;

pub use dto::{CreateProductDto, ProductDto, UpdateProductDto};
pub use product::{NewProduct, Product, ProductState};
