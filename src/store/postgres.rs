//! PostgreSQL-backed gateway and database bootstrap.

use super::ProductRepository;
use crate::error::{AppError, ConfigError};
use crate::model::{NewProduct, Product, ProductState};
use crate::sql::ProductSql;
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgRow};
use sqlx::{ConnectOptions, PgPool, Row};
use std::str::FromStr;

#[derive(Clone)]
pub struct PgProductRepository {
    pool: PgPool,
    sql: ProductSql,
}

impl PgProductRepository {
    pub fn new(pool: PgPool, schema: &str) -> Self {
        PgProductRepository {
            pool,
            sql: ProductSql::new(schema),
        }
    }

    async fn fetch_many(&self, sql: &str, bind: Option<&str>) -> Result<Vec<Product>, AppError> {
        tracing::debug!(sql = %sql, param = ?bind, "query");
        let mut query = sqlx::query(sql);
        if let Some(b) = bind {
            query = query.bind(b);
        }
        let rows = query.fetch_all(&self.pool).await?;
        rows.iter().map(product_from_row).collect()
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn list(&self) -> Result<Vec<Product>, AppError> {
        self.fetch_many(&self.sql.select_active, None).await
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Product>, AppError> {
        tracing::debug!(sql = %self.sql.select_active_by_id, id, "query");
        let row = sqlx::query(&self.sql.select_active_by_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(product_from_row).transpose()
    }

    async fn create(&self, product: NewProduct) -> Result<Product, AppError> {
        tracing::debug!(sql = %self.sql.insert, "query");
        let row = sqlx::query(&self.sql.insert)
            .bind(&product.name)
            .bind(&product.description)
            .bind(product.price)
            .bind(product.quantity)
            .bind(&product.category)
            .fetch_one(&self.pool)
            .await?;
        product_from_row(&row)
    }

    async fn update(&self, product: &Product) -> Result<Product, AppError> {
        tracing::debug!(sql = %self.sql.update, id = product.id, "query");
        let row = sqlx::query(&self.sql.update)
            .bind(product.id)
            .bind(&product.name)
            .bind(&product.description)
            .bind(product.price)
            .bind(product.quantity)
            .bind(&product.category)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Product with ID {} not found", product.id)))?;
        product_from_row(&row)
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        tracing::debug!(sql = %self.sql.soft_delete, id, "query");
        let result = sqlx::query(&self.sql.soft_delete)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            tracing::debug!(id, "soft delete matched no active row");
        }
        Ok(())
    }

    async fn exists(&self, id: i32) -> Result<bool, AppError> {
        tracing::debug!(sql = %self.sql.exists_active, id, "query");
        let (exists,): (bool,) = sqlx::query_as(&self.sql.exists_active)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn list_by_category(&self, category: &str) -> Result<Vec<Product>, AppError> {
        self.fetch_many(&self.sql.select_active_by_category, Some(category)).await
    }

    async fn list_active(&self) -> Result<Vec<Product>, AppError> {
        self.fetch_many(&self.sql.select_active, None).await
    }

    async fn count_all(&self) -> Result<u64, AppError> {
        let (count,): (i64,) = sqlx::query_as(&self.sql.count_all)
            .fetch_one(&self.pool)
            .await?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

fn product_from_row(row: &PgRow) -> Result<Product, AppError> {
    Ok(Product {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        price: row.try_get("price")?,
        quantity: row.try_get("quantity")?,
        category: row.try_get("category")?,
        state: ProductState::from_flag(row.try_get("is_active")?),
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// Connect to the server's `postgres` database and create the target database if missing.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let Some((admin, db_name)) = admin_options(database_url)? else {
        return Ok(());
    };
    let mut conn: sqlx::PgConnection = admin.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", crate::sql::quoted(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Same server and credentials, pointed at `postgres`, plus the target database name.
/// `None` when the url names no database or names `postgres` itself.
fn admin_options(database_url: &str) -> Result<Option<(PgConnectOptions, String)>, AppError> {
    let opts = PgConnectOptions::from_str(database_url).map_err(|e| ConfigError::Invalid {
        key: "DATABASE_URL",
        reason: e.to_string(),
    })?;
    let db_name = match opts.get_database() {
        Some(name) if !name.is_empty() && name != "postgres" => name.to_string(),
        _ => return Ok(None),
    };
    Ok(Some((opts.database("postgres"), db_name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_options_swap_database_name() {
        let (admin, db) = admin_options("postgres://u:p@db.internal:5433/products?sslmode=disable")
            .unwrap()
            .unwrap();
        assert_eq!(db, "products");
        assert_eq!(admin.get_database(), Some("postgres"));
        assert_eq!(admin.get_host(), "db.internal");
        assert_eq!(admin.get_port(), 5433);
        assert_eq!(admin.get_username(), "u");
    }

    #[test]
    fn query_parameters_do_not_leak_into_database_name() {
        let (admin, db) = admin_options("postgres://u:p@localhost/products?sslrootcert=/etc/ca.pem")
            .unwrap()
            .unwrap();
        assert_eq!(db, "products");
        assert_eq!(admin.get_host(), "localhost");
    }

    #[test]
    fn url_without_database_needs_no_bootstrap() {
        let opts = PgConnectOptions::from_str("postgres://localhost").unwrap();
        if opts.get_database().is_none() {
            assert!(admin_options("postgres://localhost").unwrap().is_none());
        }
        assert!(admin_options("postgres://u:p@localhost/postgres").unwrap().is_none());
    }

    #[test]
    fn unparseable_url_is_config_error() {
        assert!(matches!(
            admin_options("not a url"),
            Err(AppError::Config(ConfigError::Invalid { key: "DATABASE_URL", .. }))
        ));
    }
}
