use serde::{Deserialize, Serialize};

use crate::bank::QuestionBody;
use crate::error::QuizError;
use crate::instance::QuizInstance;

/// One student response, positional within the attempt. For multiple-choice,
/// `raw_value` is the decimal string of the index the student selected in the
/// options they were shown; for every other kind it is literal text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedAnswer {
    pub raw_value: String,
}

impl SubmittedAnswer {
    pub fn new(raw_value: impl Into<String>) -> Self {
        SubmittedAnswer { raw_value: raw_value.into() }
    }
}

/// A submitted answer resolved to the text the student actually asserted.
/// `Unanswered` is the sentinel for an index that could not be resolved; it is
/// deliberately not a string, so corrupted numeric input can never collide
/// with legitimate option text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ReconciledAnswer {
    Answered(String),
    Unanswered,
}

impl ReconciledAnswer {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ReconciledAnswer::Answered(text) => Some(text),
            ReconciledAnswer::Unanswered => None,
        }
    }
}

/// Maps submitted answers back to semantic values using the instances the
/// student actually saw.
///
/// Strictly positional: `submitted[i]` answers `instances[i]`. A length
/// mismatch means the caller is grading a different quiz than was delivered
/// (stale instance or tampered request) and is a hard error; truncating or
/// padding would misattribute every answer after the gap.
pub fn reconcile(
    instances: &[QuizInstance],
    submitted: &[SubmittedAnswer],
) -> Result<Vec<ReconciledAnswer>, QuizError> {
    if instances.len() != submitted.len() {
        return Err(QuizError::MalformedSubmission {
            expected: instances.len(),
            got: submitted.len(),
        });
    }

    let reconciled = instances
        .iter()
        .zip(submitted)
        .map(|(inst, answer)| reconcile_one(inst, answer))
        .collect();
    Ok(reconciled)
}

fn reconcile_one(inst: &QuizInstance, answer: &SubmittedAnswer) -> ReconciledAnswer {
    match inst.question.body {
        QuestionBody::MultipleChoice { .. } => {
            let raw = answer.raw_value.trim();
            match raw.parse::<usize>() {
                Ok(index) if index < inst.presented_options.len() => {
                    ReconciledAnswer::Answered(inst.presented_options[index].clone())
                }
                Ok(index) => {
                    tracing::debug!(
                        question_id = %inst.question.id,
                        index,
                        option_count = inst.presented_options.len(),
                        "submitted option index out of range; treating as unanswered"
                    );
                    ReconciledAnswer::Unanswered
                }
                Err(_) => {
                    tracing::debug!(
                        question_id = %inst.question.id,
                        raw_value = raw,
                        "submitted option index is not a non-negative integer; treating as unanswered"
                    );
                    ReconciledAnswer::Unanswered
                }
            }
        }
        _ => ReconciledAnswer::Answered(answer.raw_value.trim().to_string()),
    }
}

/// Grading outcome. `percent` is count-based per the grading policy; the
/// points fields additionally weight each question by its authored point
/// value for gradebook display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
    pub correct_count: usize,
    pub total_count: usize,
    pub percent: u32,
    pub points_earned: f64,
    pub points_possible: f64,
}

/// Scores reconciled answers against the instances' carried answer keys.
///
/// Comparison is always against `answer_key_text`, never `answer_key_index`,
/// so the result is invariant under any reordering of `presented_options`.
/// An invalid multiple-choice instance scores as incorrect no matter what was
/// submitted (fail closed). Essay answers earn participation credit when
/// non-empty after trimming.
pub fn score(instances: &[QuizInstance], reconciled: &[ReconciledAnswer]) -> ScoreReport {
    let mut correct_count = 0usize;
    let mut points_earned = 0.0f64;
    let mut points_possible = 0.0f64;

    for (inst, answer) in instances.iter().zip(reconciled) {
        points_possible += inst.question.weight;
        if is_correct(inst, answer) {
            correct_count += 1;
            points_earned += inst.question.weight;
        }
    }

    let total_count = instances.len();
    let percent = if total_count == 0 {
        0
    } else {
        (100.0 * correct_count as f64 / total_count as f64).round() as u32
    };

    ScoreReport {
        correct_count,
        total_count,
        percent,
        points_earned,
        points_possible,
    }
}

fn is_correct(inst: &QuizInstance, answer: &ReconciledAnswer) -> bool {
    let Some(text) = answer.as_text() else {
        return false;
    };
    match inst.question.body {
        QuestionBody::MultipleChoice { .. } => inst.valid && text == inst.answer_key_text,
        QuestionBody::TrueFalse { .. } | QuestionBody::ShortAnswer { .. } => {
            text.trim().eq_ignore_ascii_case(inst.answer_key_text.trim())
        }
        QuestionBody::Essay => !text.trim().is_empty(),
    }
}
