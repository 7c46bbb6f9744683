//! Test doubles for the store and cache seams

use async_trait::async_trait;
use chrono::Utc;
use meals_db::{CreateMealParams, Meal, StoreError};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::cache::{CacheBackend, CacheError, MealsSnapshot, MemoryCache};
use crate::state::AppState;
use crate::store::MealStore;

/// In-memory store mimicking the SQL ordering and id assignment
#[derive(Default)]
pub struct MemoryMealStore {
    meals: Mutex<Vec<Meal>>,
    failing: AtomicBool,
    lists: AtomicUsize,
    inserts: AtomicUsize,
}

impl MemoryMealStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_meals(meals: Vec<Meal>) -> Self {
        Self {
            meals: Mutex::new(meals),
            ..Self::default()
        }
    }

    /// Make every operation fail as if the database were unreachable
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn list_count(&self) -> usize {
        self.lists.load(Ordering::SeqCst)
    }

    pub fn insert_count(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolTimedOut.into());
        }
        Ok(())
    }
}

#[async_trait]
impl MealStore for MemoryMealStore {
    async fn list_all(&self) -> Result<Vec<Meal>, StoreError> {
        self.check()?;
        self.lists.fetch_add(1, Ordering::SeqCst);
        let mut meals = self.meals.lock().unwrap().clone();
        meals.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(meals)
    }

    async fn insert(&self, params: &CreateMealParams) -> Result<Meal, StoreError> {
        self.check()?;
        self.inserts.fetch_add(1, Ordering::SeqCst);
        let mut meals = self.meals.lock().unwrap();
        let meal = Meal {
            id: meals.iter().map(|m| m.id).max().unwrap_or(0) + 1,
            name: params.name.clone(),
            calories: params.calories,
            created_at: Utc::now(),
        };
        meals.push(meal.clone());
        Ok(meal)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check()
    }
}

/// Cache whose server is permanently unreachable
pub struct FailingCache;

#[async_trait]
impl CacheBackend for FailingCache {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Err(CacheError::Connection("connection refused".into()))
    }

    async fn set(&self, _key: &str, _value: &[u8], _ttl: Duration) -> Result<(), CacheError> {
        Err(CacheError::Connection("connection refused".into()))
    }

    async fn delete(&self, _key: &str) -> Result<(), CacheError> {
        Err(CacheError::Connection("connection refused".into()))
    }
}

/// Wraps another backend and counts calls, including failed ones
pub struct RecordingCache {
    inner: Arc<dyn CacheBackend>,
    sets: AtomicUsize,
    deletes: AtomicUsize,
    deleted_keys: Mutex<Vec<String>>,
}

impl RecordingCache {
    pub fn new(inner: Arc<dyn CacheBackend>) -> Self {
        Self {
            inner,
            sets: AtomicUsize::new(0),
            deletes: AtomicUsize::new(0),
            deleted_keys: Mutex::new(Vec::new()),
        }
    }

    pub fn set_count(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }

    pub fn delete_count(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    pub fn deleted_keys(&self) -> Vec<String> {
        self.deleted_keys.lock().unwrap().clone()
    }
}

#[async_trait]
impl CacheBackend for RecordingCache {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<(), CacheError> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.inner.set(key, value, ttl).await
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.deleted_keys.lock().unwrap().push(key.to_string());
        self.inner.delete(key).await
    }
}

/// State wired to the given store and cache backend
pub fn test_state(store: Arc<MemoryMealStore>, cache: Arc<dyn CacheBackend>) -> AppState {
    AppState::new(store, MealsSnapshot::new(cache))
}

/// State with an empty store and a working in-memory cache
pub fn default_test_state() -> (AppState, Arc<MemoryMealStore>) {
    let store = Arc::new(MemoryMealStore::new());
    let state = test_state(store.clone(), Arc::new(MemoryCache::new()));
    (state, store)
}
