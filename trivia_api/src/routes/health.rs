use axum::{extract::State, http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqlitePool;

use crate::db;

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub success: bool,
    pub database: String,
    pub total_questions: Option<i64>,
    pub timestamp: i64,
}

// GET /health - 503 when the question bank cannot be reached
pub async fn health_check(State(pool): State<SqlitePool>) -> (StatusCode, Json<HealthResponse>) {
    let checked = async {
        db::ping(&pool).await?;
        db::count_questions(&pool).await
    };

    let (status, database, total_questions) = match checked.await {
        Ok(total) => (StatusCode::OK, "ok", Some(total)),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "unreachable", None)
        }
    };

    let response = HealthResponse {
        success: status.is_success(),
        database: database.to_string(),
        total_questions,
        timestamp: chrono::Utc::now().timestamp(),
    };

    (status, Json(response))
}
