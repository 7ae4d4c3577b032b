pub mod categories;
pub mod health;
pub mod questions;
pub mod quizzes;

use crate::error::ApiError;

// Unknown paths
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

// Known paths hit with an unbound method
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
