//! Lesson payload model and validation.

pub mod model;
pub mod validation;

#[cfg(test)]
mod tests;

pub use model::{Exercise, LessonRequest, DEFAULT_DIFFICULTY, DEFAULT_TOPIC_TITLE};
pub use validation::{validate_exercise, LessonValidator, ValidationError, DEFAULT_MAX_EXERCISES};
