//! HTTP surface tests driving the router against the in-memory store.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use intake_service::domain::IntakeService;
use intake_service::inbound::router;
use intake_service::outbound::{MemoryStore, Store};

fn memory_app() -> Router {
    router(Arc::new(IntakeService::new(MemoryStore::new())))
}

fn unconfigured_app() -> Router {
    router(Arc::new(IntakeService::new(Store::Unconfigured)))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn json_request(method: &str, uri: &str, payload: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn health_reports_service_name() {
    let app = memory_app();
    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "intake_service");
}

#[tokio::test]
async fn create_normalizes_ui_input() {
    let app = memory_app();
    let payload = json!({
        "nombreApellido": "Ana Pérez",
        "genero": "femenino",
        "casoNumero": "7",
        "apoyoSocialPuntaje": "",
        "apoyoSocialAyudaVecinos": "3.5",
        "situacionesSalud": "[\"Salud mental\"]",
    });

    let (status, body) = send(&app, json_request("POST", "/beneficiaries", payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);

    let data = &body["data"];
    assert_eq!(data["nombre_apellido"], "Ana Pérez");
    assert_eq!(data["genero"], "Femenino");
    assert_eq!(data["caso_numero"], 7);
    assert_eq!(data["apoyo_social_puntaje"], Value::Null);
    assert_eq!(data["apoyo_social_vecinos"], 3.5);
    assert_eq!(data["situaciones_salud"], json!(["Salud mental"]));
}

#[tokio::test]
async fn list_returns_newest_first() {
    let app = memory_app();
    send(&app, json_request("POST", "/beneficiaries", json!({ "nombreApellido": "Primero" }))).await;
    send(&app, json_request("POST", "/beneficiaries", json!({ "nombreApellido": "Segundo" }))).await;

    let (status, body) = send(&app, get("/beneficiaries")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"][0]["nombre_apellido"], "Segundo");
    assert_eq!(body["data"][1]["nombre_apellido"], "Primero");
}

#[tokio::test]
async fn next_case_number_counts_up_from_stored_max() {
    let app = memory_app();
    let (_, body) = send(&app, get("/next-case-number")).await;
    assert_eq!(body, json!({ "success": true, "nextCaseNumber": 1 }));

    send(&app, json_request("POST", "/beneficiaries", json!({ "casoNumero": 7 }))).await;
    let (_, body) = send(&app, get("/next-case-number")).await;
    assert_eq!(body, json!({ "success": true, "nextCaseNumber": 8 }));
}

#[tokio::test]
async fn empty_put_leaves_record_unchanged() {
    let app = memory_app();
    let (_, created) = send(
        &app,
        json_request(
            "POST",
            "/beneficiaries",
            json!({ "nombreApellido": "Ana", "localidad": "Suba" }),
        ),
    )
    .await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(&app, json_request("PUT", &format!("/beneficiaries/{id}"), json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], created["data"]);
}

#[tokio::test]
async fn put_updates_only_present_fields() {
    let app = memory_app();
    let (_, created) = send(
        &app,
        json_request(
            "POST",
            "/beneficiaries",
            json!({ "nombreApellido": "Ana", "localidad": "Suba", "genero": "femenino" }),
        ),
    )
    .await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        json_request("PUT", &format!("/beneficiaries/{id}"), json!({ "localidad": "Bosa" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["localidad"], "Bosa");
    assert_eq!(body["data"]["nombre_apellido"], "Ana");
    assert_eq!(body["data"]["genero"], "Femenino");
}

#[tokio::test]
async fn detail_view_resolves_emotion_labels() {
    let app = memory_app();
    let (_, created) = send(
        &app,
        json_request(
            "POST",
            "/beneficiaries",
            json!({ "emociones": [{ "emocion": "Miedo", "intensidad": "Alta" }, "Alegría"] }),
        ),
    )
    .await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(&app, get(&format!("/beneficiaries/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let detalle = body["emocionesDetalle"].as_array().unwrap();
    assert_eq!(detalle[0]["label"], "Miedo (Alta)");
    assert_eq!(detalle[1]["label"], "Alegría");
    assert!(detalle[0]["palette"]["card"].as_str().unwrap().contains("green"));
}

#[tokio::test]
async fn unknown_id_yields_null_data_not_an_error() {
    let app = memory_app();
    let (status, body) = send(&app, get("/beneficiaries/nope")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], Value::Null);
}

#[tokio::test]
async fn delete_removes_the_record() {
    let app = memory_app();
    let (_, created) = send(&app, json_request("POST", "/beneficiaries", json!({}))).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Request::builder()
            .method("DELETE")
            .uri(format!("/beneficiaries/{id}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (_, body) = send(&app, get(&format!("/beneficiaries/{id}"))).await;
    assert_eq!(body["data"], Value::Null);
}

#[tokio::test]
async fn report_summary_aggregates_records() {
    let app = memory_app();
    send(
        &app,
        json_request(
            "POST",
            "/beneficiaries",
            json!({ "genero": "femenino", "localidad": "Suba" }),
        ),
    )
    .await;
    send(
        &app,
        json_request(
            "POST",
            "/beneficiaries",
            json!({ "genero": "Femenino", "localidad": "Bosa" }),
        ),
    )
    .await;

    let (status, body) = send(&app, get("/reports/summary")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 2);
    assert_eq!(body["data"]["generos"]["Femenino"], 2);
    assert_eq!(body["data"]["topLocalidades"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn unconfigured_backend_degrades_reads() {
    let app = unconfigured_app();

    let (status, body) = send(&app, get("/beneficiaries")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "data": [], "fallback": true }));

    let (status, body) = send(&app, get("/next-case-number")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "success": true, "nextCaseNumber": 1, "fallback": true })
    );

    let (status, body) = send(&app, get("/reports/summary")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fallback"], true);
    assert_eq!(body["data"]["total"], 0);
}

#[tokio::test]
async fn unconfigured_backend_rejects_writes() {
    let app = unconfigured_app();

    let (status, body) = send(
        &app,
        json_request("POST", "/beneficiaries", json!({ "nombreApellido": "Ana" })),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "La base de datos no está configurada en este entorno");

    let (status, _) = send(
        &app,
        json_request("PUT", "/beneficiaries/some-id", json!({ "localidad": "Bosa" })),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = memory_app();
    let (status, body) = send(&app, get("/api-doc/openapi.json")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/beneficiaries"].is_object());
}
