//! Meals API
//!
//! List-and-create REST API for meals. PostgreSQL is the source of truth;
//! the full collection is cached as one JSON snapshot with a short TTL and
//! dropped on every create.

pub mod cache;
pub mod config;
pub mod error;
pub mod routes;
pub mod server;
pub mod state;
pub mod store;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use error::{AppError, Result, StartupError};
pub use server::{cors_layer, create_router, start_server};
pub use state::AppState;
