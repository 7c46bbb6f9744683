//! Record store for the meals service
//!
//! Owns the authoritative meal set in PostgreSQL: schema migrations,
//! connection bootstrap with bounded retry, and the list / insert queries.

pub mod config;
pub mod connect;
pub mod error;
pub mod meals;
pub mod migrate;
pub mod types;

pub use connect::{connect_with_retry, RetryPolicy};
pub use error::StoreError;
pub use sqlx::postgres::PgPool;
pub use types::*;
