use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::models::*;
use crate::pagination::Page;

/// Open a pool for `database_url`, creating the file if needed.
/// Foreign keys are enforced on every connection.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new().connect_with(options).await
}

/// Create the tables and seed the standard categories
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Round-trip a trivial query to check the pool can reach the database
pub async fn ping(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(r#"SELECT 1"#).execute(pool).await?;
    Ok(())
}

// Category queries
pub async fn get_all_categories(pool: &SqlitePool) -> Result<Vec<Category>, sqlx::Error> {
    sqlx::query_as::<_, Category>(
        r#"SELECT id, type FROM categories ORDER BY id"#
    )
    .fetch_all(pool)
    .await
}

pub async fn get_category(pool: &SqlitePool, category_id: i64) -> Result<Option<Category>, sqlx::Error> {
    sqlx::query_as::<_, Category>(
        r#"SELECT id, type FROM categories WHERE id = ?"#
    )
    .bind(category_id)
    .fetch_optional(pool)
    .await
}

// Question queries
pub async fn count_questions(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as(r#"SELECT COUNT(*) FROM questions"#)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn get_all_questions(pool: &SqlitePool) -> Result<Vec<Question>, sqlx::Error> {
    sqlx::query_as::<_, Question>(
        r#"SELECT id, question, answer, category, difficulty FROM questions ORDER BY id"#
    )
    .fetch_all(pool)
    .await
}

/// One page of questions ordered by id
pub async fn get_questions_page(pool: &SqlitePool, page: Page) -> Result<Vec<Question>, sqlx::Error> {
    sqlx::query_as::<_, Question>(
        r#"SELECT id, question, answer, category, difficulty
           FROM questions
           ORDER BY id
           LIMIT ? OFFSET ?"#
    )
    .bind(page.limit())
    .bind(page.offset())
    .fetch_all(pool)
    .await
}

pub async fn get_questions_by_category(pool: &SqlitePool, category_id: i64) -> Result<Vec<Question>, sqlx::Error> {
    sqlx::query_as::<_, Question>(
        r#"SELECT id, question, answer, category, difficulty
           FROM questions
           WHERE category = ?
           ORDER BY id"#
    )
    .bind(category_id)
    .fetch_all(pool)
    .await
}

/// Case-insensitive substring search over the question text.
/// LIKE wildcards in `term` are matched literally.
pub async fn search_questions(pool: &SqlitePool, term: &str) -> Result<Vec<Question>, sqlx::Error> {
    sqlx::query_as::<_, Question>(
        r#"SELECT id, question, answer, category, difficulty
           FROM questions
           WHERE question LIKE ? ESCAPE '\'
           ORDER BY id"#
    )
    .bind(format!("%{}%", escape_like(term)))
    .fetch_all(pool)
    .await
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

pub async fn get_question(pool: &SqlitePool, question_id: i64) -> Result<Option<Question>, sqlx::Error> {
    sqlx::query_as::<_, Question>(
        r#"SELECT id, question, answer, category, difficulty FROM questions WHERE id = ?"#
    )
    .bind(question_id)
    .fetch_optional(pool)
    .await
}

/// Insert a question in its own transaction and return the new id
pub async fn insert_question(pool: &SqlitePool, new: &NewQuestion) -> Result<i64, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let (id,): (i64,) = sqlx::query_as(
        r#"INSERT INTO questions (question, answer, category, difficulty)
           VALUES (?, ?, ?, ?)
           RETURNING id"#
    )
    .bind(&new.question)
    .bind(&new.answer)
    .bind(new.category)
    .bind(new.difficulty)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(id)
}

/// Delete a question in its own transaction.
///
/// Returns `false` when no such question exists. Any error drops the
/// transaction uncommitted, which rolls it back.
pub async fn delete_question(pool: &SqlitePool, question_id: i64) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let exists: Option<(i64,)> = sqlx::query_as(r#"SELECT id FROM questions WHERE id = ?"#)
        .bind(question_id)
        .fetch_optional(&mut *tx)
        .await?;

    if exists.is_none() {
        return Ok(false);
    }

    sqlx::query(r#"DELETE FROM questions WHERE id = ?"#)
        .bind(question_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(true)
}
