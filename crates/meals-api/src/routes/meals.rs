//! `/api/meals`: cache-aside list and write-through-to-store create
//!
//! Reads check the collection snapshot first and only fall through to the
//! store on a miss. Creates go straight to the store and then drop the
//! snapshot. Concurrent reads and creates are not serialized: a read that
//! listed the store just before a create committed can write its snapshot
//! after the create's invalidation, and that stale snapshot lives until the
//! TTL runs out.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use meals_db::CreateMealParams;
use serde::Deserialize;
use tracing::info;

use crate::cache::Lookup;
use crate::error::AppError;
use crate::state::AppState;

/// Create payload. Any `id` or `created_at` sent by the client is ignored.
/// Absent fields take their zero value; the store is the only validator.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateMealRequest {
    name: String,
    calories: i32,
}

pub async fn list_meals(State(state): State<AppState>) -> Result<Response, AppError> {
    let write_back = match state.snapshot.fetch().await {
        Lookup::Hit(cached) => return Ok(json_bytes(cached)),
        Lookup::Miss => true,
        // Don't pay the connect timeout a second time on this request
        Lookup::Unreachable => false,
    };

    let meals = state.store.list_all().await?;
    let body = serde_json::to_vec(&meals).map_err(|e| AppError::Internal(e.to_string()))?;
    if write_back {
        state.snapshot.store(&body).await;
    }

    Ok(json_bytes(body))
}

pub async fn create_meal(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<meals_db::Meal>), AppError> {
    let value: serde_json::Value =
        serde_json::from_slice(&body).map_err(|e| AppError::MalformedRequest(e.to_string()))?;
    // Field defaults would otherwise let `[]` through as an empty meal
    if !value.is_object() {
        return Err(AppError::MalformedRequest("expected a JSON object".to_string()));
    }
    let request: CreateMealRequest =
        serde_json::from_value(value).map_err(|e| AppError::MalformedRequest(e.to_string()))?;

    let meal = state
        .store
        .insert(&CreateMealParams {
            name: request.name,
            calories: request.calories,
        })
        .await?;
    info!(id = meal.id, "Created meal");

    state.snapshot.invalidate().await;

    Ok((StatusCode::CREATED, Json(meal)))
}

fn json_bytes(body: Vec<u8>) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}
