use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::bank::{BankQuestion, QuestionBody};

/// Option-order policy for instantiation.
///
/// `Preserve` is the default: once question *selection* is randomized and
/// scoring is text-based, reordering options buys no security and historically
/// caused index/text desynchronization bugs. `Shuffle` is available for extra
/// anti-cheating value; the answer key is always recomputed against the order
/// actually presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OptionOrder {
    #[default]
    Preserve,
    Shuffle,
}

/// The rendering of one question as one student sees it for one attempt.
///
/// `answer_key_text` is the scoring authority. `answer_key_index` is carried
/// for display/audit only; scoring must never consult it, because a
/// serialize/deserialize cycle that reorders options desynchronizes index from
/// text while leaving the text itself intact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuizInstance {
    pub question: BankQuestion,
    pub presented_options: Vec<String>,
    pub answer_key_text: String,
    pub answer_key_index: usize,
    pub valid: bool,
}

/// Answer-stripped view of an instance, safe to serialize to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StudentQuestion {
    pub id: String,
    pub kind: String,
    pub prompt: String,
    pub presented_options: Vec<String>,
    pub weight: f64,
}

impl From<&QuizInstance> for StudentQuestion {
    fn from(inst: &QuizInstance) -> Self {
        StudentQuestion {
            id: inst.question.id.clone(),
            kind: inst.question.kind_name().to_string(),
            prompt: inst.question.prompt.clone(),
            presented_options: inst.presented_options.clone(),
            weight: inst.question.weight,
        }
    }
}

/// Projects instantiated questions into what the delivery layer may show the
/// student. The full instances (with answer keys) stay server-side and must be
/// persisted as-is for grading.
pub fn student_view(instances: &[QuizInstance]) -> Vec<StudentQuestion> {
    instances.iter().map(StudentQuestion::from).collect()
}

/// Builds the per-student quiz from the selected questions.
///
/// For multiple-choice, the answer key must match exactly one presented
/// option. Zero matches (bad authoring) or several (duplicate option text)
/// mark the instance invalid: grading then fails closed rather than silently
/// crediting whichever option happens to share the text.
pub fn instantiate<R: Rng + ?Sized>(
    selected: &[BankQuestion],
    order: OptionOrder,
    rng: &mut R,
) -> Vec<QuizInstance> {
    selected.iter().map(|q| instantiate_one(q, order, rng)).collect()
}

fn instantiate_one<R: Rng + ?Sized>(
    q: &BankQuestion,
    order: OptionOrder,
    rng: &mut R,
) -> QuizInstance {
    match &q.body {
        QuestionBody::MultipleChoice {
            options,
            correct_answer,
        } => {
            let mut presented = options.clone();
            if order == OptionOrder::Shuffle {
                presented.shuffle(rng);
            }
            let matches: Vec<usize> = presented
                .iter()
                .enumerate()
                .filter(|(_, opt)| *opt == correct_answer)
                .map(|(i, _)| i)
                .collect();
            let (index, valid) = match matches.as_slice() {
                [i] => (*i, true),
                [] => {
                    tracing::warn!(
                        question_id = %q.id,
                        "correct answer matches no presented option; instance marked invalid"
                    );
                    (0, false)
                }
                _ => {
                    tracing::warn!(
                        question_id = %q.id,
                        match_count = matches.len(),
                        "correct answer matches multiple presented options; instance marked invalid"
                    );
                    (0, false)
                }
            };
            QuizInstance {
                question: q.clone(),
                presented_options: presented,
                answer_key_text: correct_answer.clone(),
                answer_key_index: index,
                valid,
            }
        }
        QuestionBody::TrueFalse { correct_answer }
        | QuestionBody::ShortAnswer { correct_answer } => QuizInstance {
            question: q.clone(),
            presented_options: Vec::new(),
            answer_key_text: correct_answer.clone(),
            answer_key_index: 0,
            valid: true,
        },
        QuestionBody::Essay => QuizInstance {
            question: q.clone(),
            presented_options: Vec::new(),
            answer_key_text: String::new(),
            answer_key_index: 0,
            valid: true,
        },
    }
}
