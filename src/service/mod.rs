//! Product lifecycle: validation, existence checks and gateway orchestration.

mod products;
mod validation;
pub use products::ProductService;
pub use validation::{ProductValidator, CATEGORY_MAX_LEN, DESCRIPTION_MAX_LEN, NAME_MAX_LEN};
