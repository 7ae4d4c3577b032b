use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use sqlx::sqlite::SqlitePool;

use crate::db;
use crate::error::ApiError;
use crate::extract::{AppJson, IdPath};
use crate::models::{
    CreateQuestionResponse, DeleteQuestionResponse, NewQuestion, QuestionListResponse,
    QuestionsAction, QuestionsBody, QuestionsPageResponse, category_map,
};
use crate::pagination::{Page, PageQuery};

/// GET /questions?page=N - One page of questions plus the category map.
///
/// `current_category` is the label of the last question on the page, which
/// is why an empty page is a 404 rather than an empty list.
pub async fn get_questions(
    State(pool): State<SqlitePool>,
    Query(params): Query<PageQuery>,
) -> Result<Json<QuestionsPageResponse>, ApiError> {
    let page = params.page();

    let load = async {
        let questions = db::get_questions_page(&pool, page).await?;
        let total_questions = db::count_questions(&pool).await?;
        let categories = db::get_all_categories(&pool).await?;
        Ok::<_, sqlx::Error>((questions, total_questions, categories))
    };

    let (questions, total_questions, categories) = load.await.map_err(|e| {
        tracing::error!("Failed to load questions page {}: {}", page.number(), e);
        ApiError::NotFound
    })?;

    let categories = category_map(categories);

    let last = questions.last().ok_or_else(|| {
        tracing::debug!("Page {} is empty", page.number());
        ApiError::NotFound
    })?;

    let current_category = categories.get(&last.category).cloned().ok_or_else(|| {
        tracing::error!("Question {} has unknown category {}", last.id, last.category);
        ApiError::NotFound
    })?;

    Ok(Json(QuestionsPageResponse {
        success: true,
        questions,
        total_questions,
        categories,
        current_category,
    }))
}

/// GET|DELETE /questions/{id} - Delete a question and return the first page
/// of what is left
pub async fn delete_question(
    State(pool): State<SqlitePool>,
    IdPath(question_id): IdPath,
) -> Result<Json<DeleteQuestionResponse>, ApiError> {
    let deleted = db::delete_question(&pool, question_id).await.map_err(|e| {
        tracing::error!("Failed to delete question {}: {}", question_id, e);
        ApiError::NotFound
    })?;

    if !deleted {
        return Err(ApiError::NotFound);
    }

    tracing::info!("Deleted question {}", question_id);

    let load = async {
        let questions = db::get_questions_page(&pool, Page::first()).await?;
        let total_questions = db::count_questions(&pool).await?;
        Ok::<_, sqlx::Error>((questions, total_questions))
    };

    let (questions, total_questions) = load.await.map_err(|e| {
        tracing::error!("Failed to reload questions after delete: {}", e);
        ApiError::NotFound
    })?;

    Ok(Json(DeleteQuestionResponse {
        success: true,
        deleted: question_id,
        total_questions,
        questions,
    }))
}

/// POST /questions - Search when the body has a `searchTerm`, create otherwise
pub async fn create_or_search_questions(
    State(pool): State<SqlitePool>,
    Query(params): Query<PageQuery>,
    AppJson(body): AppJson<QuestionsBody>,
) -> Result<Response, ApiError> {
    let action = body.into_action().map_err(|e| {
        tracing::debug!("Rejected questions body: {:?}", e);
        ApiError::Unprocessable
    })?;

    match action {
        QuestionsAction::Search(term) => {
            search_questions(&pool, &term, params.page()).await.map(IntoResponse::into_response)
        }
        QuestionsAction::Create(new) => {
            create_question(&pool, &new).await.map(IntoResponse::into_response)
        }
    }
}

// totalQuestions counts the returned page, not every match
async fn search_questions(
    pool: &SqlitePool,
    term: &str,
    page: Page,
) -> Result<Json<QuestionListResponse>, ApiError> {
    let matches = db::search_questions(pool, term).await.map_err(|e| {
        tracing::error!("Search for {:?} failed: {}", term, e);
        ApiError::Unprocessable
    })?;

    let questions = page.apply(matches);

    let last_category = questions.last().map(|q| q.category).ok_or_else(|| {
        tracing::debug!("Search for {:?} matched nothing on page {}", term, page.number());
        ApiError::Unprocessable
    })?;

    let category = db::get_category(pool, last_category)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load category {}: {}", last_category, e);
            ApiError::Unprocessable
        })?
        .ok_or(ApiError::Unprocessable)?;

    Ok(Json(QuestionListResponse {
        success: true,
        total_questions: questions.len(),
        questions,
        current_category: category.kind,
    }))
}

async fn create_question(
    pool: &SqlitePool,
    new: &NewQuestion,
) -> Result<(StatusCode, Json<CreateQuestionResponse>), ApiError> {
    let id = db::insert_question(pool, new).await.map_err(|e| {
        tracing::warn!("Failed to create question: {}", e);
        ApiError::Unprocessable
    })?;

    tracing::info!("Created question {}", id);

    Ok((
        StatusCode::CREATED,
        Json(CreateQuestionResponse {
            success: true,
            created: id,
        }),
    ))
}
