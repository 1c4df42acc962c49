//! Field constraints for product create and update bodies.

use crate::error::{AppError, FieldErrors};
use crate::model::{CreateProductDto, UpdateProductDto};
use rust_decimal::Decimal;

pub const NAME_MAX_LEN: usize = 100;
pub const DESCRIPTION_MAX_LEN: usize = 500;
pub const CATEGORY_MAX_LEN: usize = 50;
/// Storage keeps prices as NUMERIC(18,2).
const PRICE_MAX_SCALE: u32 = 2;
const PRICE_MAX_INTEGER_DIGITS: u32 = 16;

/// Smallest price that no longer fits the column.
fn price_ceiling() -> Decimal {
    Decimal::from(10i64.pow(PRICE_MAX_INTEGER_DIGITS))
}

pub struct ProductValidator;

impl ProductValidator {
    /// Validate a create body. All violations are reported, keyed by JSON field name.
    pub fn validate_create(body: &CreateProductDto) -> Result<(), AppError> {
        validate_fields(&body.name, &body.description, body.price, body.quantity, &body.category)
    }

    /// Validate an update body. Same rules as create: every field is overwritten.
    pub fn validate_update(body: &UpdateProductDto) -> Result<(), AppError> {
        validate_fields(&body.name, &body.description, body.price, body.quantity, &body.category)
    }
}

fn validate_fields(
    name: &str,
    description: &str,
    price: Decimal,
    quantity: i32,
    category: &str,
) -> Result<(), AppError> {
    let mut errors = FieldErrors::new();
    required_text(&mut errors, "name", name, NAME_MAX_LEN);
    max_length(&mut errors, "description", description, DESCRIPTION_MAX_LEN);
    if price < Decimal::ZERO {
        errors.add("price", "price must not be negative");
    }
    if price.normalize().scale() > PRICE_MAX_SCALE {
        errors.add("price", format!("price must have at most {} decimal places", PRICE_MAX_SCALE));
    }
    if price >= price_ceiling() {
        errors.add(
            "price",
            format!("price must have at most {} digits before the decimal point", PRICE_MAX_INTEGER_DIGITS),
        );
    }
    if quantity < 0 {
        errors.add("quantity", "quantity must not be negative");
    }
    required_text(&mut errors, "category", category, CATEGORY_MAX_LEN);
    errors.into_result()
}

fn required_text(errors: &mut FieldErrors, field: &str, value: &str, max: usize) {
    if value.trim().is_empty() {
        errors.add(field, format!("{} is required", field));
    }
    max_length(errors, field, value, max);
}

fn max_length(errors: &mut FieldErrors, field: &str, value: &str, max: usize) {
    if value.chars().count() > max {
        errors.add(field, format!("{} must be at most {} characters", field, max));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> CreateProductDto {
        CreateProductDto {
            name: "Widget".into(),
            description: String::new(),
            price: Decimal::new(999, 2),
            quantity: 5,
            category: "Tools".into(),
        }
    }

    fn errors_of(body: &CreateProductDto) -> FieldErrors {
        match ProductValidator::validate_create(body) {
            Err(AppError::Validation(e)) => e,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn valid_body_passes() {
        assert!(ProductValidator::validate_create(&widget()).is_ok());
    }

    #[test]
    fn blank_name_is_required() {
        let mut body = widget();
        body.name = "   ".into();
        let errors = errors_of(&body);
        assert_eq!(errors.get("name"), Some(&["name is required".to_string()][..]));
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["name"]);
    }

    #[test]
    fn lengths_count_characters() {
        let mut body = widget();
        body.name = "é".repeat(NAME_MAX_LEN);
        body.category = "c".repeat(CATEGORY_MAX_LEN);
        body.description = "d".repeat(DESCRIPTION_MAX_LEN);
        assert!(ProductValidator::validate_create(&body).is_ok());

        body.name.push('x');
        body.category.push('x');
        body.description.push('x');
        let errors = errors_of(&body);
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["category", "description", "name"]);
    }

    #[test]
    fn negative_numbers_are_rejected() {
        let mut body = widget();
        body.price = Decimal::new(-1, 2);
        body.quantity = -3;
        let errors = errors_of(&body);
        assert!(errors.get("price").is_some());
        assert!(errors.get("quantity").is_some());
    }

    #[test]
    fn zero_price_and_quantity_are_allowed() {
        let mut body = widget();
        body.price = Decimal::ZERO;
        body.quantity = 0;
        assert!(ProductValidator::validate_create(&body).is_ok());
    }

    #[test]
    fn price_precision_is_limited() {
        let mut body = widget();
        body.price = Decimal::new(9999, 3);
        assert!(errors_of(&body).get("price").is_some());
        body.price = Decimal::new(99900, 4);
        assert!(ProductValidator::validate_create(&body).is_ok());
    }

    #[test]
    fn price_must_fit_storage_column() {
        let mut body = widget();
        body.price = Decimal::from_i128_with_scale(10i128.pow(20), 0);
        assert!(errors_of(&body).get("price").is_some());
        body.price = price_ceiling();
        assert!(errors_of(&body).get("price").is_some());
        body.price = Decimal::new(9_999_999_999_999_999_99, 2);
        assert!(ProductValidator::validate_create(&body).is_ok());
    }

    #[test]
    fn update_uses_same_rules() {
        let body = UpdateProductDto {
            category: String::new(),
            ..UpdateProductDto::default()
        };
        match ProductValidator::validate_update(&body) {
            Err(AppError::Validation(e)) => {
                assert!(e.get("name").is_some());
                assert!(e.get("category").is_some());
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
