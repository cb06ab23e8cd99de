//! Input validation for lesson payloads.
//!
//! Checks run in a fixed order and stop at the first failure, so the caller
//! always gets exactly one reason back.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use super::model::LessonRequest;
use crate::document::traits::Validator;

pub const DEFAULT_MAX_EXERCISES: usize = 50;

/// Validation error carrying the human-readable reason returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Input must be a JSON object")]
    NotAnObject,
    #[error("Missing required field: 'exercises'")]
    MissingExercises,
    #[error("'exercises' must be an array")]
    ExercisesNotArray,
    #[error("'exercises' array cannot be empty")]
    EmptyExercises,
    #[error("Too many exercises. Maximum allowed: {max}")]
    TooManyExercises { max: usize },
    #[error("Exercise {index} must be a dictionary")]
    ExerciseNotObject { index: usize },
    #[error("Exercise {index} missing 'question' field")]
    MissingQuestion { index: usize },
    #[error("Exercise {index} 'question' must be a string")]
    QuestionNotString { index: usize },
    #[error("Exercise {index} 'question' cannot be empty")]
    EmptyQuestion { index: usize },
    #[error("Invalid lesson content: {0}")]
    Malformed(String),
}

impl ValidationError {
    /// The payload field the error refers to, for logging.
    pub fn field(&self) -> String {
        match self {
            Self::NotAnObject | Self::Malformed(_) => "$".to_string(),
            Self::MissingExercises
            | Self::ExercisesNotArray
            | Self::EmptyExercises
            | Self::TooManyExercises { .. } => "exercises".to_string(),
            Self::ExerciseNotObject { index } => format!("exercises[{}]", index - 1),
            Self::MissingQuestion { index }
            | Self::QuestionNotString { index }
            | Self::EmptyQuestion { index } => format!("exercises[{}].question", index - 1),
        }
    }
}

/// Validates raw JSON and produces a typed [`LessonRequest`].
#[derive(Debug, Clone, Copy)]
pub struct LessonValidator {
    max_exercises: usize,
}

impl LessonValidator {
    pub fn new(max_exercises: usize) -> Self {
        Self { max_exercises }
    }
}

impl Default for LessonValidator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_EXERCISES)
    }
}

impl Validator for LessonValidator {
    type Output = LessonRequest;

    fn validate(&self, payload: &Value) -> Result<LessonRequest, ValidationError> {
        let object = payload.as_object().ok_or(ValidationError::NotAnObject)?;

        let exercises = object
            .get("exercises")
            .ok_or(ValidationError::MissingExercises)?
            .as_array()
            .ok_or(ValidationError::ExercisesNotArray)?;

        if exercises.is_empty() {
            return Err(ValidationError::EmptyExercises);
        }

        if exercises.len() > self.max_exercises {
            return Err(ValidationError::TooManyExercises {
                max: self.max_exercises,
            });
        }

        for (i, exercise) in exercises.iter().enumerate() {
            validate_exercise(exercise, i + 1)?;
        }

        LessonRequest::deserialize(payload).map_err(|e| ValidationError::Malformed(e.to_string()))
    }
}

/// Validate a single exercise entry. `index` starts at 1.
pub fn validate_exercise(exercise: &Value, index: usize) -> Result<(), ValidationError> {
    let object = exercise
        .as_object()
        .ok_or(ValidationError::ExerciseNotObject { index })?;

    let question = object
        .get("question")
        .ok_or(ValidationError::MissingQuestion { index })?
        .as_str()
        .ok_or(ValidationError::QuestionNotString { index })?;

    if question.trim().is_empty() {
        return Err(ValidationError::EmptyQuestion { index });
    }

    Ok(())
}
