use actix_web::HttpRequest;

use crate::config::AppConfig;
use crate::error::ApiError;

/// Raw `Authorization` header value, if present and valid UTF-8.
fn extract_authorization(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
}

/// Compare two byte strings without short-circuiting on the first mismatch.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    let mut diff = a.len() ^ b.len();
    for i in 0..a.len().max(b.len()) {
        let x = a.get(i).copied().unwrap_or(0);
        let y = b.get(i).copied().unwrap_or(0);
        diff |= usize::from(x ^ y);
    }
    diff == 0
}

/// Check that the request carries exactly `Bearer <API_SECRET>`.
pub fn authorize_request(req: &HttpRequest, config: &AppConfig) -> Result<(), ApiError> {
    let expected = config.expected_authorization();

    match extract_authorization(req) {
        Some(header) if constant_time_eq(header.as_bytes(), expected.as_bytes()) => Ok(()),
        Some(header) => {
            log::warn!(
                "Unauthorized access attempt - header mismatch (received {} bytes, expected {})",
                header.len(),
                expected.len()
            );
            Err(ApiError::Unauthorized)
        }
        None => {
            log::warn!("Unauthorized access attempt - missing Authorization header");
            Err(ApiError::Unauthorized)
        }
    }
}
