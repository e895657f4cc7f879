//! Knowledge quiz endpoints.

use axum::Json;
use serde_json::{Value, json};

use crate::observability::metrics;
use crate::quiz::{CategorySummary, GradeReport, QuizSubmission};

/// `GET /quiz/questions` — the bank, answers stripped.
pub async fn questions() -> Json<Value> {
    let questions = crate::quiz::questions();
    let total_questions = questions.len();

    Json(json!({
        "questions": questions,
        "total_questions": total_questions,
    }))
}

/// `POST /quiz/submit` — grade a submission.
pub async fn submit(Json(submission): Json<QuizSubmission>) -> Json<GradeReport> {
    let report = crate::quiz::grade(&submission);
    metrics::record_quiz_submission(report.score_percentage);
    Json(report)
}

/// `GET /quiz/categories` — category names with question counts.
pub async fn categories() -> Json<CategorySummary> {
    Json(crate::quiz::categories())
}
