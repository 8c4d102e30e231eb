//! Quiz assembly and grading core for a learning-management system.
//!
//! The pipeline is select -> instantiate -> (deliver, persist instances) ->
//! reconcile -> score. Every step is a pure function of its arguments; the
//! surrounding system owns persistence, HTTP, and auth. Scoring compares
//! answer *text*, never option indices, so results are invariant under any
//! reordering of the options a student was shown.

mod attempt;
mod bank;
mod error;
mod grade;
mod instance;

pub use attempt::{check_retake, grade_attempt, QuizAttempt, RetakeGrant};
pub use bank::{dedupe_by_prompt, parse_bank, select, BankQuestion, QuestionBody};
pub use error::QuizError;
pub use grade::{reconcile, score, ReconciledAnswer, ScoreReport, SubmittedAnswer};
pub use instance::{instantiate, student_view, OptionOrder, QuizInstance, StudentQuestion};
