//! End-to-end tests over a live socket: a mocked provider behind the real
//! proxy server, called through the real gateway by a studio session.

use std::sync::Arc;

use actix_web::{web, App};
use mueblegen::ai::imagen::NO_IMAGE_MESSAGE;
use mueblegen::ai::{ImageGenerationService, ImagenClient};
use mueblegen::gateway::{GenerateService, HttpGenerateClient};
use mueblegen::models::FurnitureType;
use mueblegen::server::{self, AppState};
use mueblegen::studio::{StudioSession, ViewState};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL: &str = "imagen-4.0-generate-001";
const PREDICT_PATH: &str = "/v1beta/models/imagen-4.0-generate-001:predict";

fn encode(bytes: &[u8]) -> String {
    use base64::Engine as _;
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

/// Boot the real proxy on a random port, wired to `provider_url`.
fn start_proxy(provider_url: String) -> actix_test::TestServer {
    actix_test::start(move || {
        let provider = ImagenClient::new("test-key".to_string(), MODEL.to_string())
            .with_base_url(provider_url.clone());
        let state = web::Data::new(AppState {
            image_gen: Some(Arc::new(provider) as Arc<dyn ImageGenerationService>),
        });
        App::new().app_data(state).configure(server::configure)
    })
}

#[actix_web::test]
async fn test_generate_table_end_to_end() {
    let provider = MockServer::start().await;
    let jpeg = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
    let encoded = encode(&jpeg);

    // The prompt built from the form fields must reach the provider with
    // both the category name and the verbatim description.
    Mock::given(method("POST"))
        .and(path(PREDICT_PATH))
        .and(body_string_contains("Mesa"))
        .and(body_string_contains("mesa de roble"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "predictions": [{ "bytesBase64Encoded": encoded, "mimeType": "image/jpeg" }]
        })))
        .expect(1)
        .mount(&provider)
        .await;

    let proxy = start_proxy(provider.uri());
    let gateway = HttpGenerateClient::new(&proxy.url(""));

    let mut session = StudioSession::new();
    session.set_furniture_type(FurnitureType::Table);
    session.set_description("mesa de roble");

    match session.generate(&gateway).await {
        ViewState::Success { image } => {
            assert!(image.starts_with("data:image/jpeg;base64,"));
            assert_eq!(image.trim_start_matches("data:image/jpeg;base64,"), encoded);
        }
        other => panic!("expected Success, got {:?}", other),
    }
}

#[actix_web::test]
async fn test_provider_without_images_ends_in_failed() {
    let provider = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(PREDICT_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "predictions": [] })),
        )
        .mount(&provider)
        .await;

    let proxy = start_proxy(provider.uri());
    let gateway = HttpGenerateClient::new(&proxy.url(""));

    let mut session = StudioSession::new();
    session.set_description("una estantería imposible");

    match session.generate(&gateway).await {
        ViewState::Failed { message } => {
            // The proxy's surfaced message travels through untouched.
            assert_eq!(message, NO_IMAGE_MESSAGE);
        }
        other => panic!("expected Failed, got {:?}", other),
    }
}

#[actix_web::test]
async fn test_gateway_resolves_raw_base64() {
    let provider = MockServer::start().await;
    let encoded = encode(b"raw-bytes");

    Mock::given(method("POST"))
        .and(path(PREDICT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "predictions": [{ "bytesBase64Encoded": encoded, "mimeType": "image/jpeg" }]
        })))
        .mount(&provider)
        .await;

    let proxy = start_proxy(provider.uri());
    let gateway = HttpGenerateClient::new(&proxy.url(""));

    // The gateway hands back bare base64; the data-URI prefix is the
    // session's job.
    let image_data = gateway.generate("una mesa").await.unwrap();
    assert_eq!(image_data, encoded);
    assert!(!image_data.starts_with("data:"));
}

#[actix_web::test]
async fn test_proxy_contract_over_the_wire() {
    let provider = MockServer::start().await;
    let proxy = start_proxy(provider.uri());
    let client = reqwest::Client::new();

    let resp = client
        .get(proxy.url("/api/generate"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 405);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Método no permitido.");

    let resp = client
        .post(proxy.url("/api/generate"))
        .json(&serde_json::json!({ "prompt": "" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 400);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "La descripción (prompt) es requerida.");
}
