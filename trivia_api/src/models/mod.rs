use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::deserializers::deserialize_id;

/// Category row, rendered as `{id, type}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: i64,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
}

/// Question row, rendered as `{id, question, answer, category, difficulty}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

/// Category id -> type label, serialized as a JSON object ordered by id
pub type CategoryMap = BTreeMap<i64, String>;

pub fn category_map(categories: Vec<Category>) -> CategoryMap {
    categories.into_iter().map(|c| (c.id, c.kind)).collect()
}

/// Fields required to insert a question
#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

fn default_category() -> i64 {
    1
}

fn default_difficulty() -> i64 {
    1
}

// POST /questions serves both search and create, so every field is optional
// at the JSON level and validated in `into_action`.
#[derive(Debug, Deserialize)]
pub struct QuestionsBody {
    #[serde(default, rename = "searchTerm")]
    pub search_term: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    // form selects post these as strings
    #[serde(default = "default_category", deserialize_with = "deserialize_id")]
    pub category: i64,
    #[serde(default = "default_difficulty", deserialize_with = "deserialize_id")]
    pub difficulty: i64,
}

/// What a validated POST /questions body asks for
#[derive(Debug)]
pub enum QuestionsAction {
    Search(String),
    Create(NewQuestion),
}

/// Reasons a POST /questions body cannot be acted on
#[derive(Debug, PartialEq, Eq)]
pub enum QuestionsBodyError {
    /// Neither a question/answer pair nor a search term
    Empty,
    /// Create mode without question or answer text
    MissingField(&'static str),
}

impl QuestionsBody {
    /// A non-empty search term wins over create fields. An empty search term
    /// passes the first check but then falls through to create mode.
    pub fn into_action(self) -> Result<QuestionsAction, QuestionsBodyError> {
        if (self.question.is_none() || self.answer.is_none()) && self.search_term.is_none() {
            return Err(QuestionsBodyError::Empty);
        }

        if let Some(term) = self.search_term.filter(|t| !t.is_empty()) {
            return Ok(QuestionsAction::Search(term));
        }

        let question = self.question.ok_or(QuestionsBodyError::MissingField("question"))?;
        let answer = self.answer.ok_or(QuestionsBodyError::MissingField("answer"))?;

        Ok(QuestionsAction::Create(NewQuestion {
            question,
            answer,
            category: self.category,
            difficulty: self.difficulty,
        }))
    }
}

/// Category filter sent by the quiz client; id 0 means "all categories"
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QuizCategory {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: i64,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl QuizCategory {
    pub fn is_all(&self) -> bool {
        self.id == 0
    }
}

#[derive(Debug, Deserialize)]
pub struct QuizRequest {
    #[serde(default)]
    pub quiz_category: Option<QuizCategory>,
    pub previous_questions: Vec<i64>,
}

impl QuizRequest {
    /// Category to draw from, `None` for every category
    pub fn category_filter(&self) -> Option<i64> {
        self.quiz_category
            .as_ref()
            .filter(|c| !c.is_all())
            .map(|c| c.id)
    }
}

// Response for GET /categories
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: CategoryMap,
    pub total_categories: usize,
}

// Response for GET /questions
#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionsPageResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: i64,
    pub categories: CategoryMap,
    pub current_category: String,
}

// Response for GET|DELETE /questions/{id}
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteQuestionResponse {
    pub success: bool,
    pub deleted: i64,
    pub total_questions: i64,
    pub questions: Vec<Question>,
}

// Response for POST /questions in create mode
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateQuestionResponse {
    pub success: bool,
    pub created: i64,
}

// Response for POST /questions in search mode and GET /categories/{id}/questions
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionListResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub current_category: String,
}

// Response for POST /quizzes
#[derive(Debug, Serialize, Deserialize)]
pub struct QuizResponse {
    pub success: bool,
    pub question: Option<Question>,
    pub previous_questions: Vec<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(json: &str) -> QuestionsBody {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn create_defaults_category_and_difficulty() {
        let action = body(r#"{"question": "Q?", "answer": "A"}"#).into_action().unwrap();
        match action {
            QuestionsAction::Create(new) => {
                assert_eq!(new.category, 1);
                assert_eq!(new.difficulty, 1);
            }
            other => panic!("expected create, got {other:?}"),
        }
    }

    #[test]
    fn create_accepts_numeric_strings() {
        let action = body(r#"{"question": "Q?", "answer": "A", "category": "2", "difficulty": "3"}"#)
            .into_action()
            .unwrap();
        match action {
            QuestionsAction::Create(new) => assert_eq!((new.category, new.difficulty), (2, 3)),
            other => panic!("expected create, got {other:?}"),
        }
    }

    #[test]
    fn search_term_wins_over_create_fields() {
        let action = body(r#"{"searchTerm": "movie", "question": "Q?", "answer": "A"}"#)
            .into_action()
            .unwrap();
        assert!(matches!(action, QuestionsAction::Search(term) if term == "movie"));
    }

    #[test]
    fn missing_question_without_search_is_rejected() {
        let err = body(r#"{"answer": "A", "category": 2}"#).into_action().unwrap_err();
        assert_eq!(err, QuestionsBodyError::Empty);
    }

    #[test]
    fn empty_search_term_falls_through_to_create() {
        let err = body(r#"{"searchTerm": ""}"#).into_action().unwrap_err();
        assert_eq!(err, QuestionsBodyError::MissingField("question"));

        let action = body(r#"{"searchTerm": "", "question": "Q?", "answer": "A"}"#)
            .into_action()
            .unwrap();
        assert!(matches!(action, QuestionsAction::Create(_)));
    }

    #[test]
    fn quiz_category_zero_means_all() {
        let req: QuizRequest = serde_json::from_str(
            r#"{"quiz_category": {"id": 0, "type": "click"}, "previous_questions": []}"#,
        )
        .unwrap();
        assert_eq!(req.category_filter(), None);

        let req: QuizRequest =
            serde_json::from_str(r#"{"quiz_category": null, "previous_questions": [1]}"#).unwrap();
        assert_eq!(req.category_filter(), None);

        let req: QuizRequest = serde_json::from_str(
            r#"{"quiz_category": {"id": "3", "type": "Geography"}, "previous_questions": []}"#,
        )
        .unwrap();
        assert_eq!(req.category_filter(), Some(3));
    }

    #[test]
    fn quiz_request_requires_previous_questions_list() {
        assert!(serde_json::from_str::<QuizRequest>(r#"{"quiz_category": null}"#).is_err());
        assert!(
            serde_json::from_str::<QuizRequest>(
                r#"{"current_category": {}, "previous_questions": {}}"#
            )
            .is_err()
        );
    }

    #[test]
    fn category_map_serializes_with_string_keys() {
        let map = category_map(vec![
            Category { id: 2, kind: "Art".into() },
            Category { id: 1, kind: "Science".into() },
        ]);
        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json, serde_json::json!({"1": "Science", "2": "Art"}));
    }

    #[test]
    fn category_renders_type_field() {
        let json = serde_json::to_value(Category { id: 4, kind: "History".into() }).unwrap();
        assert_eq!(json, serde_json::json!({"id": 4, "type": "History"}));
    }
}
