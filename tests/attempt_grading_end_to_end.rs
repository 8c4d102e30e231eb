use quizcore::{
    check_retake, grade_attempt, instantiate, parse_bank, reconcile, select, student_view,
    OptionOrder, QuizError, ReconciledAnswer, RetakeGrant, SubmittedAnswer,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

const BANK_JSON: &str = r#"[
    {
        "id": "btec",
        "prompt": "What does BTEC stand for?",
        "kind": "multiple-choice",
        "options": [
            "British Technical Education Certificate",
            "Business and Technology Education Council",
            "Basic Training for Employment Courses",
            "Business Training and Exam Centre"
        ],
        "correctAnswer": "Business and Technology Education Council"
    },
    {
        "id": "hnd",
        "prompt": "What does HND stand for?",
        "kind": "multiple-choice",
        "options": [
            "Higher National Degree",
            "Higher National Diploma",
            "High-level Numeracy Diploma",
            "Higher Numeracy Degree"
        ],
        "correctAnswer": "Higher National Diploma"
    }
]"#;

#[test]
fn delivery_and_grading_pipeline_scores_full_marks() {
    let bank = parse_bank(BANK_JSON).expect("parse bank json");
    let mut rng = StdRng::seed_from_u64(2024);

    // Bank is smaller than the requested count: both questions, bank order.
    let selected = select(&bank, 10, &mut rng);
    assert_eq!(selected.len(), 2);

    let instances = instantiate(&selected, OptionOrder::Preserve, &mut rng);
    assert_eq!(instances[0].presented_options, match &selected[0].body {
        quizcore::QuestionBody::MultipleChoice { options, .. } => options.clone(),
        _ => panic!("expected multiple-choice"),
    });

    // Index 1 is the correct answer for both questions in bank order.
    let submitted = vec![SubmittedAnswer::new("1"), SubmittedAnswer::new("1")];
    let reconciled = reconcile(&instances, &submitted).expect("reconcile");
    assert_eq!(
        reconciled[0],
        ReconciledAnswer::Answered("Business and Technology Education Council".to_string())
    );
    assert_eq!(
        reconciled[1],
        ReconciledAnswer::Answered("Higher National Diploma".to_string())
    );

    let attempt = grade_attempt("quiz-7", "student-42", &instances, &submitted)
        .expect("grade attempt");
    assert_eq!(attempt.score.correct_count, 2);
    assert_eq!(attempt.score.total_count, 2);
    assert_eq!(attempt.score.percent, 100);
    assert_eq!(attempt.quiz_id, "quiz-7");
    assert_eq!(attempt.student_id, "student-42");

    // The persisted record carries answer text, never raw indices.
    let json = serde_json::to_string(&attempt).expect("serialize attempt");
    assert!(json.contains("Business and Technology Education Council"));
    assert!(!json.contains("\"answers\":[\"1\",\"1\"]"));
}

#[test]
fn out_of_range_index_scores_wrong_without_failing_the_attempt() {
    let bank = parse_bank(BANK_JSON).expect("parse bank json");
    let mut rng = StdRng::seed_from_u64(5);
    let instances = instantiate(&select(&bank, 10, &mut rng), OptionOrder::Preserve, &mut rng);

    let submitted = vec![SubmittedAnswer::new("7"), SubmittedAnswer::new("1")];
    let attempt = grade_attempt("quiz-7", "student-42", &instances, &submitted)
        .expect("grade attempt");
    assert_eq!(attempt.answers[0], ReconciledAnswer::Unanswered);
    assert_eq!(attempt.score.correct_count, 1);
    assert_eq!(attempt.score.percent, 50);
}

#[test]
fn mismatched_answer_count_refuses_to_grade() {
    let bank = parse_bank(BANK_JSON).expect("parse bank json");
    let mut rng = StdRng::seed_from_u64(5);
    let instances = instantiate(&select(&bank, 10, &mut rng), OptionOrder::Preserve, &mut rng);

    let err = grade_attempt("quiz-7", "student-42", &instances, &[SubmittedAnswer::new("1")])
        .unwrap_err();
    assert!(matches!(
        err,
        QuizError::MalformedSubmission { expected: 2, got: 1 }
    ));
}

#[test]
fn student_view_of_delivered_quiz_hides_keys() {
    let bank = parse_bank(BANK_JSON).expect("parse bank json");
    let mut rng = StdRng::seed_from_u64(5);
    let instances = instantiate(&select(&bank, 10, &mut rng), OptionOrder::Preserve, &mut rng);

    let view = student_view(&instances);
    assert_eq!(view.len(), 2);
    assert_eq!(view[0].presented_options.len(), 4);
    let json = serde_json::to_string(&view).expect("serialize view");
    assert!(!json.contains("correctAnswer"));
    assert!(!json.contains("answerKeyText"));
}

#[test]
fn retake_governance_gates_additional_attempts() {
    assert!(check_retake(None, 0).is_ok());
    assert!(matches!(
        check_retake(None, 1),
        Err(QuizError::RetakeDenied { used: 1, allowed: 1 })
    ));
    assert!(check_retake(Some(RetakeGrant { extra_attempts: 1 }), 1).is_ok());
    assert!(matches!(
        check_retake(Some(RetakeGrant { extra_attempts: 1 }), 2),
        Err(QuizError::RetakeDenied { used: 2, allowed: 2 })
    ));
}

#[test]
fn essay_and_short_answer_paths_grade_by_text() {
    let json = r#"[
        {"id":"s1","prompt":"2+2?","kind":"short-answer","correctAnswer":"4"},
        {"id":"e1","prompt":"Discuss.","kind":"essay"},
        {"id":"e2","prompt":"Reflect.","kind":"essay"}
    ]"#;
    let bank = parse_bank(json).expect("parse bank json");
    let mut rng = StdRng::seed_from_u64(5);
    let instances = instantiate(&select(&bank, 10, &mut rng), OptionOrder::Preserve, &mut rng);

    let submitted = vec![
        SubmittedAnswer::new(" 4  "),
        SubmittedAnswer::new("Some considered thoughts."),
        SubmittedAnswer::new("   "),
    ];
    let attempt = grade_attempt("quiz-9", "student-1", &instances, &submitted)
        .expect("grade attempt");
    // Short answer trims; essay earns participation credit only when
    // non-empty after trimming.
    assert_eq!(attempt.score.correct_count, 2);
    assert_eq!(attempt.score.total_count, 3);
    assert_eq!(attempt.score.percent, 67);
}
