//! Idempotent schema setup endpoint.

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::error::AppError;
use crate::startup::AppState;

#[tracing::instrument(skip(state))]
pub async fn setup_tables(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    state.db.ensure_schema().await?;

    Ok(Json(json!({
        "status": "ok",
        "message": "Tickets table created",
    })))
}
