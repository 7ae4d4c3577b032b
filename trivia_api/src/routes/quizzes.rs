use axum::{extract::State, response::Json};
use sqlx::sqlite::SqlitePool;

use crate::db;
use crate::error::ApiError;
use crate::extract::AppJson;
use crate::models::{QuizRequest, QuizResponse};
use crate::quiz;

/// POST /quizzes - Next random question the player has not seen yet.
///
/// A `null` question means every question in the pool has been played.
pub async fn next_quiz_question(
    State(pool): State<SqlitePool>,
    AppJson(request): AppJson<QuizRequest>,
) -> Result<Json<QuizResponse>, ApiError> {
    let candidates = match request.category_filter() {
        Some(category_id) => db::get_questions_by_category(&pool, category_id).await,
        None => db::get_all_questions(&pool).await,
    }
    .map_err(|e| {
        tracing::error!("Failed to load quiz pool: {}", e);
        ApiError::Unprocessable
    })?;

    let question = quiz::pick_question(
        candidates,
        &request.previous_questions,
        &mut rand::thread_rng(),
    );

    if question.is_none() {
        tracing::debug!("Quiz pool exhausted after {} questions", request.previous_questions.len());
    }

    Ok(Json(QuizResponse {
        success: true,
        question,
        previous_questions: request.previous_questions,
    }))
}
