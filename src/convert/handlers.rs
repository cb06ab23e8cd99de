use actix_web::http::header::{self, ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use futures_util::stream::StreamExt;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::auth::authorize_request;
use crate::document::{Generator, Validator};
use crate::error::ApiError;
use crate::lesson::LessonRequest;
use crate::{AppState, ErrorResponse};

pub const PDF_FILENAME: &str = "lesson.pdf";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compilers: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub checked_at: String,
}

/// `application/json`, or any `application/*+json` type.
fn is_json_content_type(req: &HttpRequest) -> bool {
    let Some(value) = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };

    let mime = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

/// Read the body, refusing anything over `limit` bytes.
async fn read_body_limited(
    req: &HttpRequest,
    mut payload: web::Payload,
    limit: usize,
) -> Result<web::Bytes, ApiError> {
    let declared = req
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<usize>().ok());
    if declared.is_some_and(|len| len > limit) {
        return Err(ApiError::PayloadTooLarge);
    }

    let mut body = web::BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|e| ApiError::Body(e.to_string()))?;
        if body.len() + chunk.len() > limit {
            return Err(ApiError::PayloadTooLarge);
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body.freeze())
}

#[utoipa::path(
    post,
    path = "/convert",
    tag = "Lesson PDF",
    request_body = LessonRequest,
    params(
        ("Authorization" = String, Header, description = "Bearer <API_SECRET>")
    ),
    responses(
        (status = 200, description = "Compiled lesson PDF (application/pdf, attachment lesson.pdf)"),
        (status = 400, description = "Invalid payload", body = ErrorResponse),
        (status = 401, description = "Missing or wrong bearer token", body = ErrorResponse),
        (status = 413, description = "Request body too large", body = ErrorResponse),
        (status = 500, description = "PDF compilation failed", body = ErrorResponse)
    )
)]
pub async fn convert_to_pdf(
    req: HttpRequest,
    payload: web::Payload,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    authorize_request(&req, &state.config)?;

    if !is_json_content_type(&req) {
        log::warn!("Bad request: Content-Type is not JSON");
        return Err(ApiError::UnsupportedContentType);
    }

    let body = read_body_limited(&req, payload, state.config.max_content_length).await?;
    let data: Value = serde_json::from_slice(&body).map_err(|e| {
        log::warn!("Bad request: {}", e);
        ApiError::InvalidJson(e.to_string())
    })?;

    let lesson = state.validator.validate(&data).map_err(|e| {
        log::warn!("Validation error at {}: {}", e.field(), e);
        e
    })?;

    let latex = state.generator.generate(&lesson);
    log::info!(
        "Generated LaTeX document ({} bytes, {} exercises)",
        latex.len(),
        lesson.exercises.len()
    );

    let pdf = state.engine.compile(&latex).await.map_err(|e| {
        log::error!("Compilation error: {}", e);
        e
    })?;
    log::info!("Compiled PDF ({} bytes)", pdf.len());

    Ok(HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(PDF_FILENAME.to_string())],
        })
        .body(pdf))
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Lesson PDF",
    responses(
        (status = 200, description = "At least one LaTeX compiler is available", body = HealthResponse),
        (status = 503, description = "No LaTeX compiler available", body = HealthResponse)
    )
)]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let compilers = state.engine.available_compilers().await;
    let checked_at = chrono::Utc::now().to_rfc3339();

    if compilers.is_empty() {
        log::warn!("Health check: no LaTeX compiler available");
        return HttpResponse::ServiceUnavailable().json(HealthResponse {
            status: "unhealthy".to_string(),
            service: None,
            compilers: None,
            error: Some("No LaTeX compiler available".to_string()),
            checked_at,
        });
    }

    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        service: Some("latex-to-pdf".to_string()),
        compilers: Some(compilers),
        error: None,
        checked_at,
    })
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/convert").route(web::post().to(convert_to_pdf)))
        .service(web::resource("/health").route(web::get().to(health_check)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_json_content_types() {
        let json = TestRequest::default()
            .insert_header((header::CONTENT_TYPE, "application/json; charset=utf-8"))
            .to_http_request();
        assert!(is_json_content_type(&json));

        let vendor = TestRequest::default()
            .insert_header((header::CONTENT_TYPE, "application/vnd.lesson+json"))
            .to_http_request();
        assert!(is_json_content_type(&vendor));

        let text = TestRequest::default()
            .insert_header((header::CONTENT_TYPE, "text/plain"))
            .to_http_request();
        assert!(!is_json_content_type(&text));

        assert!(!is_json_content_type(&TestRequest::default().to_http_request()));
    }
}
