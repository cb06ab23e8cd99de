//! Traits for the lesson pipeline stages.

use serde_json::Value;

use crate::lesson::ValidationError;

/// Trait for validating raw request payloads.
pub trait Validator {
    type Output;

    /// Validate the payload, returning the typed request on success.
    fn validate(&self, payload: &Value) -> Result<Self::Output, ValidationError>;
}

/// Trait for document source generators.
pub trait Generator<Req> {
    /// Render the complete document source for the request.
    fn generate(&self, request: &Req) -> String;
}
