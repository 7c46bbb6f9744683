//! Error types for the meals record store

use std::fmt;

/// Failure talking to the record store, classified by cause.
#[derive(Debug)]
pub enum StoreError {
    /// The database could not be reached (I/O, TLS, pool exhausted or closed)
    Unavailable(Box<sqlx::Error>),
    /// The query itself failed to execute
    Query(Box<sqlx::Error>),
    /// The database rejected the data (SQLSTATE class 23)
    ConstraintViolation(Box<sqlx::Error>),
}

impl StoreError {
    /// The driver error, without the classification prefix
    pub fn inner(&self) -> &sqlx::Error {
        match self {
            StoreError::Unavailable(err)
            | StoreError::Query(err)
            | StoreError::ConstraintViolation(err) => err.as_ref(),
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unavailable(err) => write!(f, "Store unavailable: {}", err),
            StoreError::Query(err) => write!(f, "Query error: {}", err),
            StoreError::ConstraintViolation(err) => write!(f, "Constraint violation: {}", err),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Unavailable(err)
            | StoreError::Query(err)
            | StoreError::ConstraintViolation(err) => Some(err.as_ref()),
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => StoreError::Unavailable(Box::new(err)),
            sqlx::Error::Database(db) if db.code().is_some_and(|c| c.starts_with("23")) => {
                StoreError::ConstraintViolation(Box::new(err))
            }
            _ => StoreError::Query(Box::new(err)),
        }
    }
}
