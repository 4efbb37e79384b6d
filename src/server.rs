//! HTTP proxy in front of the image-generation provider
//!
//! The server is the sole holder of the provider credential; clients send
//! a finished prompt and receive base64 image data or a JSON error. One
//! best-effort provider call per request, no retries.

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpResponse, HttpServer};

use crate::ai::{ImageGenerationService, ImagenClient};
use crate::models::{Config, ErrorResponse, GenerateRequest, GenerateResponse};

pub const PROMPT_REQUIRED: &str = "La descripción (prompt) es requerida.";
pub const METHOD_NOT_ALLOWED: &str = "Método no permitido.";
pub const CONFIG_ERROR: &str = "Error de configuración en el servidor.";

pub struct AppState {
    /// `None` when the provider credential is missing; generation requests
    /// then fail with a generic configuration error that leaks nothing.
    pub image_gen: Option<Arc<dyn ImageGenerationService>>,
}

impl AppState {
    pub fn from_config(config: &Config) -> Self {
        let image_gen = match &config.gemini_api_key {
            Some(key) => Some(Arc::new(ImagenClient::new(
                key.clone(),
                config.image_model.clone(),
            )) as Arc<dyn ImageGenerationService>),
            None => {
                tracing::warn!("Provider credential not set; generation requests will be rejected");
                None
            }
        };

        Self { image_gen }
    }
}

async fn generate(state: web::Data<AppState>, body: web::Bytes) -> HttpResponse {
    // An unparsable body or a missing field both count as a missing prompt.
    let prompt = serde_json::from_slice::<GenerateRequest>(&body)
        .map(|request| request.prompt)
        .unwrap_or_default();

    if prompt.is_empty() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: PROMPT_REQUIRED.to_string(),
        });
    }

    let Some(image_gen) = &state.image_gen else {
        return HttpResponse::InternalServerError().json(ErrorResponse {
            error: CONFIG_ERROR.to_string(),
        });
    };

    match image_gen.generate_image(&prompt).await {
        Ok(image) => {
            use base64::Engine as _;
            let encoded = base64::engine::general_purpose::STANDARD.encode(&image.bytes);
            tracing::info!(
                "Generated {} image ({} bytes)",
                image.mime_type,
                image.bytes.len()
            );
            HttpResponse::Ok().json(GenerateResponse {
                image_data: encoded,
            })
        }
        Err(e) => {
            tracing::error!("Image generation failed: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: e.to_string(),
            })
        }
    }
}

async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(ErrorResponse {
        error: METHOD_NOT_ALLOWED.to_string(),
    })
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

/// Route table, shared by the server and the in-process tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/generate")
            .route(web::post().to(generate))
            .route(web::route().to(method_not_allowed)),
    )
    .route("/api/health", web::get().to(health));
}

pub async fn run(config: Config) -> std::io::Result<()> {
    let port = config.port;
    let state = web::Data::new(AppState::from_config(&config));

    tracing::info!("Listening on 0.0.0.0:{}", port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();

        App::new()
            .app_data(state.clone())
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
