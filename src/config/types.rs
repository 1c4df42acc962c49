//! Runtime settings for the service.

use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/products";
pub const DEFAULT_SCHEMA: &str = "public";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 64 * 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub storage: StorageBackend,
    pub database_url: String,
    /// Schema that holds the products table.
    pub schema: String,
    pub max_connections: u32,
    /// `None` disables the per-call gateway timeout.
    pub query_timeout: Option<Duration>,
    pub bind_addr: SocketAddr,
    pub body_limit_bytes: usize,
    pub seed_sample_data: bool,
}
