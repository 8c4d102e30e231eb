use thiserror::Error;

/// Failures surfaced to the caller. Recoverable grading conditions (an answer
/// key that matches no option, an unparsable option index) never appear here:
/// they degrade in-band to "invalid instance" / "unanswered" so that grading
/// fails closed instead of crashing mid-pipeline.
#[derive(Error, Debug)]
pub enum QuizError {
    /// The submitted answer list does not line up with the instantiated quiz.
    /// Truncating or padding would silently grade the wrong attempt, so this
    /// is a hard failure the caller must map to a client error.
    #[error("malformed submission: quiz has {expected} questions, got {got} answers")]
    MalformedSubmission { expected: usize, got: usize },

    /// The question-bank JSON column could not be deserialized.
    #[error("bad bank json: {0}")]
    BadBankJson(#[from] serde_json::Error),

    /// The student has used up the first attempt plus any granted retakes.
    #[error("retakes exhausted: {used} attempts used, {allowed} allowed")]
    RetakeDenied { used: u32, allowed: u32 },
}
