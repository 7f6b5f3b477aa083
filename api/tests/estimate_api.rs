use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::{
    TestServer,
    multipart::{MultipartForm, Part},
};
use carbonplate_api::{
    application::http::server::http_server::{router, state},
    args::{Args, LLMArgs, LLMProviderArg, LogArgs, ServerArgs},
};
use carbonplate_core::domain::dish_analysis::policies::MAX_IMAGE_SIZE;
use serde_json::{Value, json};

fn offline_args(root_path: &str) -> Args {
    Args {
        server: ServerArgs {
            host: "127.0.0.1".to_string(),
            port: 0,
            root_path: root_path.to_string(),
            allowed_origins: vec!["http://localhost:5173".to_string()],
            metrics_enabled: false,
        },
        llm: LLMArgs {
            provider: LLMProviderArg::Offline,
            gemini_api_key: None,
            gemini_model: "gemini-2.0-flash".to_string(),
            timeout_secs: 5,
        },
        log: LogArgs {
            filter: "warn".to_string(),
            json: false,
        },
    }
}

fn test_server_at(root_path: &str) -> TestServer {
    let app_state = state(Arc::new(offline_args(root_path))).unwrap();
    TestServer::new(router(app_state).unwrap()).unwrap()
}

fn test_server() -> TestServer {
    test_server_at("")
}

fn ingredient_names(body: &Value) -> Vec<String> {
    body["ingredients"]
        .as_array()
        .unwrap()
        .iter()
        .map(|ingredient| ingredient["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn text_estimate_uses_keyword_fallback_when_offline() {
    let server = test_server();

    let response = server
        .post("/api/estimate")
        .json(&json!({ "dish": "Chicken Biryani" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();

    assert_eq!(body["dish"], "Chicken Biryani");
    assert_eq!(body["confidence"], 0.7);
    assert_eq!(
        ingredient_names(&body),
        vec!["Chicken", "Basmati Rice", "Onions", "Spices", "Cooking Oil"]
    );
    assert_eq!(body["ingredients"][0]["estimatedQuantity"], "150g");
    assert_eq!(body["ingredients"][0]["category"], "protein");
    assert_eq!(body["metadata"]["analysisMethod"], "text (fallback)");
    assert_eq!(body["metadata"]["modelUsed"], "offline");
    assert!(body["metadata"]["analyzedAt"].is_string());
    assert!(body["metadata"]["processingTimeMs"].is_u64());

    let total = body["estimatedCarbonKg"].as_f64().unwrap();
    let sum: f64 = body["ingredients"]
        .as_array()
        .unwrap()
        .iter()
        .map(|ingredient| ingredient["carbonKg"].as_f64().unwrap())
        .sum();
    assert!((total - sum).abs() < 1e-9);
}

#[tokio::test]
async fn text_estimate_for_unknown_dish_is_generic() {
    let server = test_server();

    let response = server
        .post("/api/estimate")
        .json(&json!({ "dish": "Unknown Dish XYZ" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(ingredient_names(&body), vec!["Mixed ingredients"]);
    assert_eq!(body["ingredients"][0]["estimatedQuantity"], "250g");
    assert!((body["estimatedCarbonKg"].as_f64().unwrap() - 0.5).abs() < 1e-9);
}

#[tokio::test]
async fn text_estimate_rejects_blank_dish() {
    let server = test_server();

    let response = server
        .post("/api/estimate")
        .json(&json!({ "dish": "   " }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["code"], "E_VALIDATION");
    assert_eq!(body["errors"][0]["field"], "dish");
}

#[tokio::test]
async fn text_estimate_rejects_unreadable_body() {
    let server = test_server();

    let missing_field = server.post("/api/estimate").json(&json!({})).await;
    missing_field.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = missing_field.json();
    assert_eq!(body["code"], "E_BAD_REQUEST");

    server
        .post("/api/estimate")
        .content_type("application/json")
        .bytes("{\"dish\": ".into())
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn image_estimate_uses_generic_fallback_when_offline() {
    let server = test_server();

    let form = MultipartForm::new().add_part(
        "image",
        Part::bytes(b"\xff\xd8\xff\xe0fake-jpeg".to_vec())
            .file_name("chicken_biryani.jpg")
            .mime_type("image/jpeg"),
    );

    let response = server.post("/api/estimate/image").multipart(form).await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["dish"], "chicken_biryani");
    assert_eq!(body["confidence"], 0.3);
    assert_eq!(ingredient_names(&body), vec!["Mixed ingredients"]);
    assert_eq!(body["metadata"]["analysisMethod"], "image (fallback)");
}

#[tokio::test]
async fn image_estimate_rejects_unsupported_extension() {
    let server = test_server();

    let form = MultipartForm::new().add_part(
        "image",
        Part::bytes(b"BM fake bitmap".to_vec())
            .file_name("dinner.bmp")
            .mime_type("image/bmp"),
    );

    let response = server.post("/api/estimate/image").multipart(form).await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["errors"][0]["field"], "image");
}

#[tokio::test]
async fn text_estimate_trims_before_length_check() {
    let server = test_server();
    let dish = format!("  {}  ", "x".repeat(199));

    let response = server
        .post("/api/estimate")
        .json(&json!({ "dish": dish }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["dish"].as_str().unwrap().len(), 199);

    server
        .post("/api/estimate")
        .json(&json!({ "dish": "x".repeat(201) }))
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

fn jpeg_of_size(size: usize) -> MultipartForm {
    MultipartForm::new().add_part(
        "image",
        Part::bytes(vec![0u8; size])
            .file_name("huge.jpg")
            .mime_type("image/jpeg"),
    )
}

#[tokio::test]
async fn image_estimate_rejects_image_over_size_limit() {
    let server = test_server();

    let response = server
        .post("/api/estimate/image")
        .multipart(jpeg_of_size(MAX_IMAGE_SIZE + 10))
        .await;

    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    let body: Value = response.json();
    assert_eq!(body["code"], "E_PAYLOAD_TOO_LARGE");
}

#[tokio::test]
async fn image_estimate_rejects_body_over_request_limit() {
    let server = test_server();

    let response = server
        .post("/api/estimate/image")
        .multipart(jpeg_of_size(25 * 1024 * 1024))
        .await;

    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    let body: Value = response.json();
    assert_eq!(body["code"], "E_PAYLOAD_TOO_LARGE");
}

#[tokio::test]
async fn image_estimate_rejects_non_image_content_type() {
    let server = test_server();

    let form = MultipartForm::new().add_part(
        "image",
        Part::bytes(b"just some notes".to_vec())
            .file_name("dinner.jpg")
            .mime_type("text/plain"),
    );

    let response = server.post("/api/estimate/image").multipart(form).await;

    response.assert_status(StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let body: Value = response.json();
    assert_eq!(body["code"], "E_UNSUPPORTED_MEDIA_TYPE");
}

#[tokio::test]
async fn image_estimate_requires_image_field() {
    let server = test_server();

    let form = MultipartForm::new().add_text("note", "no picture today");

    let response = server.post("/api/estimate/image").multipart(form).await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["errors"][0]["message"], "missing image field");
}

#[tokio::test]
async fn routes_and_docs_follow_root_path() {
    let server = test_server_at("/carbon");

    server
        .post("/carbon/api/estimate")
        .json(&json!({ "dish": "Beef Stew" }))
        .await
        .assert_status_ok();

    let openapi = server.get("/carbon/api-docs/openapi.json").await;
    openapi.assert_status_ok();
    let document: Value = openapi.json();
    assert!(document["paths"]["/carbon/api/estimate"].is_object());
    assert!(document["paths"]["/carbon/api/estimate/image"].is_object());
}
