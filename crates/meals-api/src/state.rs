use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::cache::MealsSnapshot;
use crate::store::MealStore;

/// Shared application state passed to all route handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MealStore>,
    pub snapshot: MealsSnapshot,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(store: Arc<dyn MealStore>, snapshot: MealsSnapshot) -> Self {
        Self {
            store,
            snapshot,
            started_at: Utc::now(),
        }
    }
}
