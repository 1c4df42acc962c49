//! Idempotent DDL for the products table, plus optional sample data.

use crate::error::AppError;
use crate::model::NewProduct;
use crate::sql::{qualified_table, quoted};
use crate::store::ProductRepository;
use rust_decimal::Decimal;
use sqlx::PgPool;

/// DDL statements in execution order for the given schema.
pub fn product_ddl(schema: &str) -> Vec<String> {
    let table = qualified_table(schema, "products");
    vec![
        format!("CREATE SCHEMA IF NOT EXISTS {}", quoted(schema)),
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                "id" SERIAL PRIMARY KEY,
                "name" VARCHAR(100) NOT NULL,
                "description" VARCHAR(500) NOT NULL DEFAULT '',
                "price" NUMERIC(18,2) NOT NULL CHECK ("price" >= 0),
                "quantity" INTEGER NOT NULL CHECK ("quantity" >= 0),
                "category" VARCHAR(50) NOT NULL,
                "is_active" BOOLEAN NOT NULL DEFAULT TRUE,
                "created_at" TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                "updated_at" TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
            table
        ),
        format!(
            r#"CREATE INDEX IF NOT EXISTS "products_active_category_idx" ON {} ("category") WHERE "is_active""#,
            table
        ),
    ]
}

/// Create schema, table and index if they do not exist yet.
pub async fn apply_migrations(pool: &PgPool, schema: &str) -> Result<(), AppError> {
    for sql in product_ddl(schema) {
        tracing::debug!(sql = %sql.trim(), "migration");
        sqlx::query(&sql).execute(pool).await?;
    }
    tracing::info!(schema = %schema, "products table ready");
    Ok(())
}

pub fn sample_products() -> Vec<NewProduct> {
    vec![
        NewProduct {
            name: "Sample Product 1".into(),
            description: "This is a sample product for demonstration".into(),
            price: Decimal::new(2999, 2),
            quantity: 100,
            category: "Electronics".into(),
        },
        NewProduct {
            name: "Sample Product 2".into(),
            description: "Another sample product".into(),
            price: Decimal::new(4999, 2),
            quantity: 50,
            category: "Books".into(),
        },
    ]
}

/// Insert the sample products when the store has never held a row. Returns how many were added.
pub async fn seed_sample_data(repo: &dyn ProductRepository) -> Result<usize, AppError> {
    if repo.count_all().await? > 0 {
        return Ok(0);
    }
    let samples = sample_products();
    let count = samples.len();
    for p in samples {
        repo.create(p).await?;
    }
    tracing::info!(count, "seeded sample products");
    Ok(count)
}
