use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use crate::cache::CacheStats;
use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    uptime_secs: u64,
    store: &'static str,
    cache: CacheStats,
}

/// Liveness plus store reachability. Always 200 so the check never takes the process down.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let store_ok = match state.store.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach store");
            false
        }
    };
    let uptime_secs = (Utc::now() - state.started_at).num_seconds().max(0) as u64;

    Json(HealthResponse {
        status: if store_ok { "ok" } else { "degraded" },
        uptime_secs,
        store: if store_ok { "ok" } else { "unavailable" },
        cache: state.snapshot.stats(),
    })
}
