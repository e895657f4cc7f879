//! Security knowledge quiz: built-in question bank plus grading.
//!
//! Grading is a pure function over the submission; HTTP handlers own the
//! metrics side. One quirk worth knowing: unknown question ids produce no
//! result row, but still count toward `total_questions`, so padding a
//! submission with junk ids lowers the score.

mod bank;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ============================================================================
// Types
// ============================================================================

/// One question in the built-in bank, correct answer included.
#[derive(Debug, Clone, Copy)]
pub struct QuizQuestion {
    pub id: &'static str,
    pub category: &'static str,
    pub question: &'static str,
    pub options: &'static [QuizOption],
    pub explanation: &'static str,
}

impl QuizQuestion {
    fn correct_option(&self) -> Option<&'static QuizOption> {
        self.options.iter().find(|o| o.is_correct)
    }
}

/// One answer option.
#[derive(Debug, Clone, Copy)]
pub struct QuizOption {
    pub id: &'static str,
    pub text: &'static str,
    pub is_correct: bool,
}

/// Learner-facing question projection. Never carries `is_correct`.
#[derive(Debug, Clone, Serialize)]
pub struct PublicQuestion {
    pub id: &'static str,
    pub category: &'static str,
    pub question: &'static str,
    pub options: Vec<PublicOption>,
}

/// Learner-facing option projection.
#[derive(Debug, Clone, Serialize)]
pub struct PublicOption {
    pub id: &'static str,
    pub text: &'static str,
}

/// Submitted answers, keyed by question id. Insertion order is preserved
/// so result rows come back in submission order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuizSubmission {
    pub answers: IndexMap<String, String>,
}

/// Graded outcome for one answered question.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerResult {
    pub question_id: String,
    pub question_text: &'static str,
    pub selected_option: String,
    pub correct_option: &'static str,
    pub is_correct: bool,
    pub explanation: &'static str,
    pub category: &'static str,
}

/// Per-category tally.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CategoryScore {
    pub correct: usize,
    pub total: usize,
    pub percentage: f64,
}

/// Full grade report for one submission.
#[derive(Debug, Clone, Serialize)]
pub struct GradeReport {
    pub total_questions: usize,
    pub correct_answers: usize,
    pub score_percentage: f64,
    pub grade: &'static str,
    pub results: Vec<AnswerResult>,
    pub category_breakdown: IndexMap<&'static str, CategoryScore>,
    pub recommendations: Vec<String>,
}

/// Category listing for discovery.
#[derive(Debug, Clone, Serialize)]
pub struct CategorySummary {
    pub categories: IndexMap<&'static str, usize>,
    pub total_questions: usize,
}

// ============================================================================
// Public API
// ============================================================================

/// All questions with answers stripped.
#[must_use]
pub fn questions() -> Vec<PublicQuestion> {
    bank::QUESTION_BANK
        .iter()
        .map(|q| PublicQuestion {
            id: q.id,
            category: q.category,
            question: q.question,
            options: q
                .options
                .iter()
                .map(|o| PublicOption {
                    id: o.id,
                    text: o.text,
                })
                .collect(),
        })
        .collect()
}

/// Grade a submission against the bank.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn grade(submission: &QuizSubmission) -> GradeReport {
    // Unknown question ids count toward the total but produce no row.
    let total_questions = submission.answers.len();

    let mut results = Vec::new();
    let mut correct_answers = 0usize;
    for (question_id, selected) in &submission.answers {
        let Some(question) = find_question(question_id) else {
            continue;
        };
        let Some(correct) = question.correct_option() else {
            continue;
        };
        let is_correct = selected == correct.id;
        if is_correct {
            correct_answers += 1;
        }
        results.push(AnswerResult {
            question_id: question_id.clone(),
            question_text: question.question,
            selected_option: selected.clone(),
            correct_option: correct.id,
            is_correct,
            explanation: question.explanation,
            category: question.category,
        });
    }

    // Breakdown keys follow bank order, not submission order.
    let mut category_breakdown: IndexMap<&'static str, CategoryScore> = IndexMap::new();
    for question in bank::QUESTION_BANK {
        let Some(selected) = submission.answers.get(question.id) else {
            continue;
        };
        let entry = category_breakdown
            .entry(question.category)
            .or_insert(CategoryScore {
                correct: 0,
                total: 0,
                percentage: 0.0,
            });
        entry.total += 1;
        if question.correct_option().is_some_and(|c| selected == c.id) {
            entry.correct += 1;
        }
    }
    for score in category_breakdown.values_mut() {
        score.percentage = round1(score.correct as f64 / score.total as f64 * 100.0);
    }

    let score_percentage = if total_questions == 0 {
        0.0
    } else {
        round1(correct_answers as f64 / total_questions as f64 * 100.0)
    };
    let grade = letter_grade(score_percentage);
    let recommendations = build_recommendations(score_percentage, &category_breakdown);

    GradeReport {
        total_questions,
        correct_answers,
        score_percentage,
        grade,
        results,
        category_breakdown,
        recommendations,
    }
}

/// Category names with question counts, in bank order.
#[must_use]
pub fn categories() -> CategorySummary {
    let mut categories: IndexMap<&'static str, usize> = IndexMap::new();
    for question in bank::QUESTION_BANK {
        *categories.entry(question.category).or_insert(0) += 1;
    }
    CategorySummary {
        categories,
        total_questions: bank::QUESTION_BANK.len(),
    }
}

// ============================================================================
// Internals
// ============================================================================

fn find_question(id: &str) -> Option<&'static QuizQuestion> {
    bank::QUESTION_BANK.iter().find(|q| q.id == id)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn letter_grade(score_percentage: f64) -> &'static str {
    if score_percentage >= 90.0 {
        "A"
    } else if score_percentage >= 80.0 {
        "B"
    } else if score_percentage >= 70.0 {
        "C"
    } else if score_percentage >= 60.0 {
        "D"
    } else {
        "F"
    }
}

fn build_recommendations(
    score_percentage: f64,
    category_breakdown: &IndexMap<&'static str, CategoryScore>,
) -> Vec<String> {
    let mut recommendations: Vec<String> = if score_percentage >= 90.0 {
        vec![
            "Excellent work! You have a strong grasp of security operations \
             fundamentals."
                .to_owned(),
            "Consider moving on to a live training scenario to apply this \
             knowledge."
                .to_owned(),
        ]
    } else if score_percentage >= 70.0 {
        vec![
            "Good foundation. Review the explanations for the questions you \
             missed."
                .to_owned(),
            "Retake the quiz after studying to confirm the gaps are closed.".to_owned(),
        ]
    } else {
        vec![
            "Significant gaps detected. Work through each explanation \
             carefully before continuing."
                .to_owned(),
            "Revisit the fundamentals of every weak topic before retaking \
             the quiz."
                .to_owned(),
        ]
    };

    for (category, score) in category_breakdown {
        if score.percentage < 70.0 {
            recommendations.push(format!(
                "Review the '{}' topic.",
                category_display_name(category)
            ));
        }
    }
    recommendations
}

fn category_display_name(category: &str) -> &str {
    match category {
        "phishing" => "Phishing Attacks",
        "malware" => "Malware Detection",
        "incident_response" => "Incident Response Procedures",
        "forensics" => "Digital Forensics",
        other => other,
    }
}

// ============================================================================
// Tests
// ============================================================================
