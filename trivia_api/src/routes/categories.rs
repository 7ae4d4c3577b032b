use axum::{extract::State, response::Json};
use sqlx::sqlite::SqlitePool;

use crate::db;
use crate::error::ApiError;
use crate::extract::IdPath;
use crate::models::{CategoriesResponse, QuestionListResponse, category_map};

// GET /categories - All categories as an id -> type map
pub async fn get_categories(
    State(pool): State<SqlitePool>,
) -> Result<Json<CategoriesResponse>, ApiError> {
    let categories = db::get_all_categories(&pool).await.map_err(|e| {
        tracing::error!("Failed to load categories: {}", e);
        ApiError::NotFound
    })?;

    let total_categories = categories.len();

    Ok(Json(CategoriesResponse {
        success: true,
        categories: category_map(categories),
        total_categories,
    }))
}

// GET /categories/{id}/questions - Every question in one category, unpaginated
pub async fn get_category_questions(
    State(pool): State<SqlitePool>,
    IdPath(category_id): IdPath,
) -> Result<Json<QuestionListResponse>, ApiError> {
    let questions = db::get_questions_by_category(&pool, category_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load questions for category {}: {}", category_id, e);
            ApiError::NotFound
        })?;

    let category = db::get_category(&pool, category_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load category {}: {}", category_id, e);
            ApiError::NotFound
        })?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(QuestionListResponse {
        success: true,
        total_questions: questions.len(),
        questions,
        current_category: category.kind,
    }))
}
