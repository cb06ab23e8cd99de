//! Unit tests for lesson validation

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::document::traits::Validator;
    use crate::lesson::{LessonValidator, ValidationError};

    #[test]
    fn test_rejects_non_object_payload() {
        let validator = LessonValidator::default();
        assert_eq!(
            validator.validate(&json!([1, 2, 3])).unwrap_err(),
            ValidationError::NotAnObject
        );
        assert_eq!(
            validator.validate(&json!("text")).unwrap_err(),
            ValidationError::NotAnObject
        );
    }

    #[test]
    fn test_missing_exercises_names_field() {
        let err = LessonValidator::default()
            .validate(&json!({ "topic_title": "Algebra" }))
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingExercises);
        assert!(err.to_string().contains("'exercises'"));
    }

    #[test]
    fn test_exercises_must_be_array() {
        let err = LessonValidator::default()
            .validate(&json!({ "exercises": { "question": "x" } }))
            .unwrap_err();
        assert_eq!(err.to_string(), "'exercises' must be an array");
    }

    #[test]
    fn test_empty_exercises() {
        let err = LessonValidator::default()
            .validate(&json!({ "exercises": [] }))
            .unwrap_err();
        assert_eq!(err.to_string(), "'exercises' array cannot be empty");
    }

    #[test]
    fn test_too_many_exercises_cites_configured_max() {
        let exercises: Vec<_> = (0..51).map(|i| json!({ "question": format!("Q{}", i) })).collect();
        let err = LessonValidator::new(50)
            .validate(&json!({ "exercises": exercises }))
            .unwrap_err();
        assert_eq!(err.to_string(), "Too many exercises. Maximum allowed: 50");

        let exercises: Vec<_> = (0..4).map(|i| json!({ "question": format!("Q{}", i) })).collect();
        let err = LessonValidator::new(3)
            .validate(&json!({ "exercises": exercises }))
            .unwrap_err();
        assert!(err.to_string().contains("3"));
    }

    #[test]
    fn test_exactly_max_exercises_passes() {
        let exercises: Vec<_> = (0..3).map(|i| json!({ "question": format!("Q{}", i) })).collect();
        let lesson = LessonValidator::new(3)
            .validate(&json!({ "exercises": exercises }))
            .unwrap();
        assert_eq!(lesson.exercises.len(), 3);
    }

    #[test]
    fn test_exercise_errors_use_one_based_index() {
        let validator = LessonValidator::default();

        let err = validator
            .validate(&json!({ "exercises": [{ "question": "ok" }, "nope"] }))
            .unwrap_err();
        assert_eq!(err.to_string(), "Exercise 2 must be a dictionary");

        let err = validator
            .validate(&json!({ "exercises": [{ "difficulty": "Easy" }] }))
            .unwrap_err();
        assert_eq!(err.to_string(), "Exercise 1 missing 'question' field");

        let err = validator
            .validate(&json!({ "exercises": [{ "question": "a" }, { "question": "b" }, { "question": 7 }] }))
            .unwrap_err();
        assert_eq!(err.to_string(), "Exercise 3 'question' must be a string");

        let err = validator
            .validate(&json!({ "exercises": [{ "question": "   \n" }] }))
            .unwrap_err();
        assert_eq!(err.to_string(), "Exercise 1 'question' cannot be empty");
        assert_eq!(err.field(), "exercises[0].question");
    }

    #[test]
    fn test_first_failing_rule_wins() {
        let err = LessonValidator::default()
            .validate(&json!({ "exercises": [{ "question": "" }, 42] }))
            .unwrap_err();
        assert_eq!(err, ValidationError::EmptyQuestion { index: 1 });
    }

    #[test]
    fn test_wrongly_typed_optional_field_is_malformed() {
        let err = LessonValidator::default()
            .validate(&json!({ "topic_title": 5, "exercises": [{ "question": "q" }] }))
            .unwrap_err();
        assert!(matches!(err, ValidationError::Malformed(_)));
    }

    #[test]
    fn test_valid_payload_defaults_and_hint_filtering() {
        let lesson = LessonValidator::default()
            .validate(&json!({
                "exercises": [
                    { "question": "Solve 2x=4", "hints": ["Divide by 2", "", 3, null, "  "] },
                    { "question": "Factor x^2-1", "difficulty": "Hard", "hints": "not a list" }
                ]
            }))
            .unwrap();

        assert_eq!(lesson.topic_title(), "Daily Lesson");
        assert_eq!(lesson.theory(), None);
        assert_eq!(lesson.exercises[0].difficulty(), "General");
        assert_eq!(lesson.exercises[0].hints, vec!["Divide by 2".to_string()]);
        assert_eq!(lesson.exercises[1].difficulty(), "Hard");
        assert!(lesson.exercises[1].hints.is_empty());
    }

    #[test]
    fn test_validation_does_not_mutate_input() {
        let payload = json!({ "exercises": [{ "question": " keep spacing " }] });
        let before = payload.clone();
        let lesson = LessonValidator::default().validate(&payload).unwrap();
        assert_eq!(payload, before);
        assert_eq!(lesson.exercises[0].question, " keep spacing ");
    }
}
