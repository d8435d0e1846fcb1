use axum::extract::State;
use axum::http::StatusCode;

use ecclesia_core::health::readiness;

use crate::state::AppState;

/// `GET /readyz`: PostgreSQL answers a ping and a Redis connection can be checked out.
pub async fn readyz(State(state): State<AppState>) -> StatusCode {
    let probe = async {
        state.db.ping().await.map_err(|e| e.to_string())?;
        state.redis.get().await.map_err(|e| e.to_string())?;
        Ok::<(), String>(())
    };
    readiness(probe.await)
}
