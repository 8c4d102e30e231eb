use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::QuizError;

fn default_weight() -> f64 {
    1.0
}

/// Kind-specific payload of a bank question. The option list and answer key
/// only exist on the arms that have them; `correctAnswer` is the answer's
/// literal text, never an index (no index into `options` carries meaning
/// outside a given rendering).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind")]
pub enum QuestionBody {
    #[serde(rename = "multiple-choice")]
    MultipleChoice {
        options: Vec<String>,
        #[serde(rename = "correctAnswer")]
        correct_answer: String,
    },
    #[serde(rename = "true-false")]
    TrueFalse {
        #[serde(rename = "correctAnswer")]
        correct_answer: String,
    },
    #[serde(rename = "short-answer")]
    ShortAnswer {
        #[serde(rename = "correctAnswer")]
        correct_answer: String,
    },
    #[serde(rename = "essay")]
    Essay,
}

/// One source-of-truth question as authored, matching the JSON shape stored in
/// the quiz table's text column.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BankQuestion {
    pub id: String,
    pub prompt: String,
    #[serde(default = "default_weight")]
    pub weight: f64,
    #[serde(flatten)]
    pub body: QuestionBody,
}

impl BankQuestion {
    pub fn kind_name(&self) -> &'static str {
        match self.body {
            QuestionBody::MultipleChoice { .. } => "multiple-choice",
            QuestionBody::TrueFalse { .. } => "true-false",
            QuestionBody::ShortAnswer { .. } => "short-answer",
            QuestionBody::Essay => "essay",
        }
    }
}

/// Deserializes a question bank from its stored JSON text column.
pub fn parse_bank(json: &str) -> Result<Vec<BankQuestion>, QuizError> {
    Ok(serde_json::from_str(json)?)
}

/// Drops questions whose prompt text duplicates an earlier entry, keeping the
/// first occurrence in bank order. Faulty ingestion is known to produce literal
/// duplicates, and one quiz instance must never show the same prompt twice.
pub fn dedupe_by_prompt(bank: &[BankQuestion]) -> Vec<BankQuestion> {
    let mut seen: HashSet<&str> = HashSet::new();
    bank.iter()
        .filter(|q| seen.insert(q.prompt.as_str()))
        .cloned()
        .collect()
}

/// Samples `count` distinct questions from the bank, uniformly at random.
///
/// The bank is deduplicated by prompt first. When the deduplicated bank is no
/// larger than `count` it is returned whole, in bank order; otherwise a
/// Fisher-Yates shuffle followed by truncation gives every `count`-subset (and
/// ordering) equal probability. A zero `count` or empty bank yields an empty
/// selection; the caller decides whether an empty quiz is acceptable.
pub fn select<R: Rng + ?Sized>(
    bank: &[BankQuestion],
    count: usize,
    rng: &mut R,
) -> Vec<BankQuestion> {
    let deduped = dedupe_by_prompt(bank);
    if count == 0 {
        return Vec::new();
    }
    if deduped.len() <= count {
        return deduped;
    }
    let mut pool = deduped;
    pool.shuffle(rng);
    pool.truncate(count);
    pool
}
