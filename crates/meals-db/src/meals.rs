use crate::error::StoreError;
use crate::types::{CreateMealParams, Meal};
use sqlx::{FromRow, PgPool};
use std::fmt::Display;
use tracing::{debug, warn};

/// List every meal, newest first.
///
/// Rows are decoded one at a time; a row that fails to decode is logged and
/// skipped so one bad record does not take down the whole listing.
pub async fn list_all(pool: &PgPool) -> Result<Vec<Meal>, StoreError> {
    let rows = sqlx::query(
        r#"
        SELECT id, name, calories, created_at
        FROM meals
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    let meals = keep_decoded(rows.iter().map(Meal::from_row));
    debug!(count = meals.len(), "Listed meals");
    Ok(meals)
}

/// Insert a meal and return it with the database-assigned `id` and `created_at`
pub async fn insert(pool: &PgPool, p: &CreateMealParams) -> Result<Meal, StoreError> {
    let meal = sqlx::query_as::<_, Meal>(
        r#"
        INSERT INTO meals (name, calories)
        VALUES ($1, $2)
        RETURNING id, name, calories, created_at
        "#,
    )
    .bind(&p.name)
    .bind(p.calories)
    .fetch_one(pool)
    .await?;
    Ok(meal)
}

/// Cheap reachability check
pub async fn ping(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

fn keep_decoded<T, E: Display>(rows: impl Iterator<Item = Result<T, E>>) -> Vec<T> {
    rows.enumerate()
        .filter_map(|(index, row)| match row {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(row = index, error = %e, "Skipping meal row that failed to decode");
                None
            }
        })
        .collect()
}
