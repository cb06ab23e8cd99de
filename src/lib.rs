use actix_web::middleware::{Compress, Logger};
use actix_web::{web, App, HttpServer};
use actix_web_prometheus::PrometheusMetricsBuilder;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod auth;
pub mod config;
pub mod convert;
pub mod document;
pub mod error;
pub mod lesson;
pub mod state;

pub use crate::config::AppConfig;
pub use crate::state::AppState;

use crate::document::common::mask_secret;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: &str) -> Self {
        Self {
            error: error.to_string(),
            details: None,
        }
    }

    pub fn with_details(error: &str, details: &str) -> Self {
        Self {
            error: error.to_string(),
            details: Some(details.to_string()),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::convert::handlers::convert_to_pdf,
        crate::convert::handlers::health_check
    ),
    components(
        schemas(
            lesson::LessonRequest,
            lesson::Exercise,
            convert::HealthResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Lesson PDF", description = "Lesson to PDF conversion endpoints.")
    )
)]
pub struct ApiDoc;

/// Initialise `env_logger` from a filter such as `info` or `debug,actix_web=info`.
pub fn init_logging(filter: &str) {
    env_logger::Builder::new()
        .parse_filters(filter)
        .format_timestamp_millis()
        .init();
}

pub async fn run() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    init_logging(&config.log_level);

    if config.uses_default_secret() {
        log::warn!("API_SECRET not set, using default secret. SET THIS IN PRODUCTION!");
    }
    log::info!(
        "API secret loaded: {} (length {})",
        mask_secret(&config.api_secret),
        config.api_secret.len()
    );
    log::info!("Max exercises: {}", config.max_exercises);
    log::info!("Max content length: {} bytes", config.max_content_length);
    log::info!("LaTeX compilers: {}", config.compiler_names().join(", "));

    let bind = (config.host.clone(), config.port);
    let app_state = web::Data::new(AppState::new(config));

    let prometheus = PrometheusMetricsBuilder::new("lesson_pdf_server")
        .endpoint("/metrics")
        .build()
        .map_err(|e| anyhow::anyhow!("failed to create Prometheus metrics middleware: {}", e))?;

    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .wrap(Compress::default())
            .wrap(prometheus.clone())
            .wrap(Logger::default())
            .app_data(app_state.clone())
            .configure(convert::config)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind(bind)?
    .run()
    .await?;

    Ok(())
}
