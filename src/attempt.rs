use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::QuizError;
use crate::grade::{reconcile, score, ReconciledAnswer, ScoreReport, SubmittedAnswer};
use crate::instance::QuizInstance;

/// Teacher-granted retake capability, owned by the external authorization
/// layer and handed in as plain data. `extra_attempts` counts attempts allowed
/// beyond the first; the first attempt never needs a grant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RetakeGrant {
    pub extra_attempts: u32,
}

/// Checks whether a student with `prior_attempts` completed attempts may start
/// another one.
pub fn check_retake(grant: Option<RetakeGrant>, prior_attempts: u32) -> Result<(), QuizError> {
    let allowed = 1 + grant.map(|g| g.extra_attempts).unwrap_or(0);
    if prior_attempts >= allowed {
        return Err(QuizError::RetakeDenied {
            used: prior_attempts,
            allowed,
        });
    }
    Ok(())
}

/// One completed, graded attempt, ready for the storage layer.
///
/// Carries the reconciled answer text rather than the raw submitted indices,
/// so review UIs can display what the student asserted without re-running
/// reconciliation against instance data that may no longer exist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuizAttempt {
    pub id: Uuid,
    pub quiz_id: String,
    pub student_id: String,
    pub answers: Vec<ReconciledAnswer>,
    pub score: ScoreReport,
    pub completed_at: DateTime<Utc>,
}

/// Grades a submission against the instances the student was shown and
/// assembles the immutable attempt record.
///
/// The instances must be the persisted set from quiz delivery; re-instantiating
/// with fresh randomness here would grade against options the student never
/// saw.
pub fn grade_attempt(
    quiz_id: &str,
    student_id: &str,
    instances: &[QuizInstance],
    submitted: &[SubmittedAnswer],
) -> Result<QuizAttempt, QuizError> {
    let answers = reconcile(instances, submitted)?;
    let score = score(instances, &answers);
    Ok(QuizAttempt {
        id: Uuid::new_v4(),
        quiz_id: quiz_id.to_string(),
        student_id: student_id.to_string(),
        answers,
        score,
        completed_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_attempt_needs_no_grant() {
        assert!(check_retake(None, 0).is_ok());
    }

    #[test]
    fn retake_without_grant_is_denied() {
        let err = check_retake(None, 1).unwrap_err();
        assert!(matches!(err, QuizError::RetakeDenied { used: 1, allowed: 1 }));
    }

    #[test]
    fn grant_extends_allowed_attempts() {
        let grant = Some(RetakeGrant { extra_attempts: 2 });
        assert!(check_retake(grant, 1).is_ok());
        assert!(check_retake(grant, 2).is_ok());
        assert!(check_retake(grant, 3).is_err());
    }
}
