//! Builds the parameterized statements the products gateway runs.
//! Every read statement carries the active-only predicate explicitly.

/// Columns in the order the row decoder expects them.
pub const PRODUCT_COLUMNS: &[&str] = &[
    "id",
    "name",
    "description",
    "price",
    "quantity",
    "category",
    "is_active",
    "created_at",
    "updated_at",
];

/// Quote identifier for PostgreSQL (safe: only from config).
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Full qualified table name.
pub fn qualified_table(schema: &str, table: &str) -> String {
    format!("{}.{}", quoted(schema), quoted(table))
}

fn column_list() -> String {
    PRODUCT_COLUMNS
        .iter()
        .map(|c| quoted(c))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Statement text for one products table, built once per schema.
#[derive(Clone, Debug)]
pub struct ProductSql {
    pub table: String,
    pub select_active: String,
    pub select_active_by_id: String,
    pub select_active_by_category: String,
    pub exists_active: String,
    pub insert: String,
    pub update: String,
    pub soft_delete: String,
    pub count_all: String,
}

impl ProductSql {
    pub fn new(schema: &str) -> Self {
        let table = qualified_table(schema, "products");
        let cols = column_list();
        // Byte order, independent of the database's default collation.
        let order = format!(" ORDER BY {} COLLATE \"C\", {}", quoted("name"), quoted("id"));
        let active = format!("{} = TRUE", quoted("is_active"));

        ProductSql {
            select_active: format!("SELECT {} FROM {} WHERE {}{}", cols, table, active, order),
            select_active_by_id: format!(
                "SELECT {} FROM {} WHERE {} = $1 AND {}",
                cols,
                table,
                quoted("id"),
                active
            ),
            select_active_by_category: format!(
                "SELECT {} FROM {} WHERE {} = $1 AND {}{}",
                cols,
                table,
                quoted("category"),
                active,
                order
            ),
            exists_active: format!(
                "SELECT EXISTS(SELECT 1 FROM {} WHERE {} = $1 AND {})",
                table,
                quoted("id"),
                active
            ),
            // created_at/updated_at come from the same clock read.
            insert: format!(
                "INSERT INTO {} ({}, {}, {}, {}, {}, {}, {}, {}) \
                 VALUES ($1, $2, $3, $4, $5, TRUE, clock_timestamp(), clock_timestamp()) RETURNING {}",
                table,
                quoted("name"),
                quoted("description"),
                quoted("price"),
                quoted("quantity"),
                quoted("category"),
                quoted("is_active"),
                quoted("created_at"),
                quoted("updated_at"),
                cols
            ),
            // updated_at must move forward even when two writes share a clock tick.
            // The active flag is never written here; only soft_delete clears it.
            update: format!(
                "UPDATE {} SET {} = $2, {} = $3, {} = $4, {} = $5, {} = $6, \
                 {} = GREATEST(clock_timestamp(), {} + INTERVAL '1 microsecond') \
                 WHERE {} = $1 AND {} RETURNING {}",
                table,
                quoted("name"),
                quoted("description"),
                quoted("price"),
                quoted("quantity"),
                quoted("category"),
                quoted("updated_at"),
                quoted("updated_at"),
                quoted("id"),
                active,
                cols
            ),
            soft_delete: format!(
                "UPDATE {} SET {} = FALSE, {} = GREATEST(clock_timestamp(), {} + INTERVAL '1 microsecond') \
                 WHERE {} = $1 AND {}",
                table,
                quoted("is_active"),
                quoted("updated_at"),
                quoted("updated_at"),
                quoted("id"),
                active
            ),
            count_all: format!("SELECT COUNT(*) FROM {}", table),
            table,
        }
    }
}
