use async_trait::async_trait;
use meals_db::{CreateMealParams, Meal, PgPool, StoreError};

/// Authoritative meal storage as seen by the request handlers
#[async_trait]
pub trait MealStore: Send + Sync {
    /// Every meal, newest first
    async fn list_all(&self) -> Result<Vec<Meal>, StoreError>;

    /// Insert and return the meal with its assigned `id` and `created_at`
    async fn insert(&self, params: &CreateMealParams) -> Result<Meal, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

/// PostgreSQL-backed store
pub struct PgMealStore {
    pool: PgPool,
}

impl PgMealStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MealStore for PgMealStore {
    async fn list_all(&self) -> Result<Vec<Meal>, StoreError> {
        meals_db::meals::list_all(&self.pool).await
    }

    async fn insert(&self, params: &CreateMealParams) -> Result<Meal, StoreError> {
        meals_db::meals::insert(&self.pool, params).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        meals_db::meals::ping(&self.pool).await
    }
}
