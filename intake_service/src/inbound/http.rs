//! axum routes and handlers.
//!
//! Every response is envelope-shaped JSON. Reads against an unconfigured
//! backend degrade to empty data with `fallback: true`; writes return 503.
//! Other storage failures log the underlying error and answer with a
//! generic localized message.

use std::sync::Arc;

use anyhow::Context;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::{OpenApi, ToSchema};

use crate::config::Config;
use crate::domain::reports::ReportSummary;
use crate::domain::service::NextCaseNumber;
use crate::domain::{BeneficiaryStore, IntakeService, StoreError};
use crate::inbound::swagger::ApiDoc;
use models_intake::api::BeneficiaryInput;
use models_intake::{Beneficiary, ParsedEmotion};

const MSG_LIST_FAILED: &str = "Error al obtener los beneficiarios";
const MSG_GET_FAILED: &str = "Error al obtener el beneficiario";
const MSG_SAVE_FAILED: &str = "Error al guardar el beneficiario";
const MSG_UPDATE_FAILED: &str = "Error al actualizar el beneficiario";
const MSG_DELETE_FAILED: &str = "Error al eliminar el beneficiario";
const MSG_REPORTS_FAILED: &str = "Error al generar el reporte";
const MSG_UNCONFIGURED: &str = "La base de datos no está configurada en este entorno";

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListBeneficiariesResponse {
    pub success: bool,
    pub data: Vec<Beneficiary>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub fallback: bool,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BeneficiaryResponse {
    pub success: bool,
    pub data: Option<Beneficiary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emociones_detalle: Option<Vec<ParsedEmotion>>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub fallback: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NextCaseNumberResponse {
    pub success: bool,
    #[serde(flatten)]
    pub next: NextCaseNumber,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReportsResponse {
    pub success: bool,
    pub data: ReportSummary,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub fallback: bool,
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

/// Map a storage failure on a write path: 503 when no backend is
/// configured, 500 with a generic message otherwise.
fn write_error(err: StoreError, message: &str) -> Response {
    match err {
        StoreError::Unconfigured => error_response(StatusCode::SERVICE_UNAVAILABLE, MSG_UNCONFIGURED),
        err => {
            tracing::error!(error = %err, "storage write failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, message)
        }
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, body = HealthResponse))
)]
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        service: "intake_service",
    })
}

#[utoipa::path(
    get,
    path = "/beneficiaries",
    responses(
        (status = 200, body = ListBeneficiariesResponse),
        (status = 500, body = String),
    )
)]
pub async fn list_beneficiaries_handler<S: BeneficiaryStore>(
    State(service): State<Arc<IntakeService<S>>>,
) -> Result<impl IntoResponse, Response> {
    match service.list().await {
        Ok(data) => Ok(Json(ListBeneficiariesResponse {
            success: true,
            data,
            fallback: false,
        })),
        Err(StoreError::Unconfigured) => Ok(Json(ListBeneficiariesResponse {
            success: true,
            data: vec![],
            fallback: true,
        })),
        Err(err) => {
            tracing::error!(error = %err, "unable to list beneficiaries");
            Err(error_response(StatusCode::INTERNAL_SERVER_ERROR, MSG_LIST_FAILED))
        }
    }
}

#[utoipa::path(
    post,
    path = "/beneficiaries",
    request_body = BeneficiaryInput,
    responses(
        (status = 201, body = BeneficiaryResponse),
        (status = 503, body = String),
        (status = 500, body = String),
    )
)]
pub async fn create_beneficiary_handler<S: BeneficiaryStore>(
    State(service): State<Arc<IntakeService<S>>>,
    Json(input): Json<BeneficiaryInput>,
) -> Result<impl IntoResponse, Response> {
    let record = service
        .create(input)
        .await
        .map_err(|err| write_error(err, MSG_SAVE_FAILED))?;
    Ok((
        StatusCode::CREATED,
        Json(BeneficiaryResponse {
            success: true,
            data: Some(record),
            emociones_detalle: None,
            fallback: false,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/beneficiaries/{id}",
    params(("id" = String, Path, description = "Beneficiary id")),
    responses(
        (status = 200, body = BeneficiaryResponse),
        (status = 500, body = String),
    )
)]
pub async fn get_beneficiary_handler<S: BeneficiaryStore>(
    State(service): State<Arc<IntakeService<S>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, Response> {
    match service.get(&id).await {
        Ok(data) => {
            let emociones_detalle = data.as_ref().map(Beneficiary::parsed_emotions);
            Ok(Json(BeneficiaryResponse {
                success: true,
                data,
                emociones_detalle,
                fallback: false,
            }))
        }
        Err(StoreError::Unconfigured) => Ok(Json(BeneficiaryResponse {
            success: true,
            data: None,
            emociones_detalle: None,
            fallback: true,
        })),
        Err(err) => {
            tracing::error!(error = %err, %id, "unable to get beneficiary");
            Err(error_response(StatusCode::INTERNAL_SERVER_ERROR, MSG_GET_FAILED))
        }
    }
}

#[utoipa::path(
    put,
    path = "/beneficiaries/{id}",
    params(("id" = String, Path, description = "Beneficiary id")),
    request_body = BeneficiaryInput,
    responses(
        (status = 200, body = BeneficiaryResponse),
        (status = 503, body = String),
        (status = 500, body = String),
    )
)]
pub async fn update_beneficiary_handler<S: BeneficiaryStore>(
    State(service): State<Arc<IntakeService<S>>>,
    Path(id): Path<String>,
    Json(input): Json<BeneficiaryInput>,
) -> Result<impl IntoResponse, Response> {
    let data = service
        .update(&id, input)
        .await
        .map_err(|err| write_error(err, MSG_UPDATE_FAILED))?;
    if data.is_none() {
        tracing::error!(%id, "update targeted an unknown beneficiary");
        return Err(error_response(StatusCode::INTERNAL_SERVER_ERROR, MSG_UPDATE_FAILED));
    }
    Ok(Json(BeneficiaryResponse {
        success: true,
        data,
        emociones_detalle: None,
        fallback: false,
    }))
}

#[utoipa::path(
    delete,
    path = "/beneficiaries/{id}",
    params(("id" = String, Path, description = "Beneficiary id")),
    responses(
        (status = 200, body = DeleteResponse),
        (status = 503, body = String),
        (status = 500, body = String),
    )
)]
pub async fn delete_beneficiary_handler<S: BeneficiaryStore>(
    State(service): State<Arc<IntakeService<S>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, Response> {
    let removed = service
        .delete(&id)
        .await
        .map_err(|err| write_error(err, MSG_DELETE_FAILED))?;
    if !removed {
        tracing::error!(%id, "delete targeted an unknown beneficiary");
        return Err(error_response(StatusCode::INTERNAL_SERVER_ERROR, MSG_DELETE_FAILED));
    }
    Ok(Json(DeleteResponse {
        success: true,
        message: "Beneficiario eliminado correctamente".to_string(),
    }))
}

#[utoipa::path(
    get,
    path = "/next-case-number",
    responses((status = 200, body = NextCaseNumberResponse))
)]
pub async fn next_case_number_handler<S: BeneficiaryStore>(
    State(service): State<Arc<IntakeService<S>>>,
) -> impl IntoResponse {
    Json(NextCaseNumberResponse {
        success: true,
        next: service.next_case_number().await,
    })
}

#[utoipa::path(
    get,
    path = "/reports/summary",
    responses(
        (status = 200, body = ReportsResponse),
        (status = 500, body = String),
    )
)]
pub async fn report_summary_handler<S: BeneficiaryStore>(
    State(service): State<Arc<IntakeService<S>>>,
) -> Result<impl IntoResponse, Response> {
    match service.report_summary().await {
        Ok(data) => Ok(Json(ReportsResponse {
            success: true,
            data,
            fallback: false,
        })),
        Err(StoreError::Unconfigured) => Ok(Json(ReportsResponse {
            success: true,
            data: ReportSummary::default(),
            fallback: true,
        })),
        Err(err) => {
            tracing::error!(error = %err, "unable to build report summary");
            Err(error_response(StatusCode::INTERNAL_SERVER_ERROR, MSG_REPORTS_FAILED))
        }
    }
}

async fn openapi_handler() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

pub fn router<S: BeneficiaryStore>(service: Arc<IntakeService<S>>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/beneficiaries",
            get(list_beneficiaries_handler::<S>).post(create_beneficiary_handler::<S>),
        )
        .route(
            "/beneficiaries/{id}",
            get(get_beneficiary_handler::<S>)
                .put(update_beneficiary_handler::<S>)
                .delete(delete_beneficiary_handler::<S>),
        )
        .route("/next-case-number", get(next_case_number_handler::<S>))
        .route("/reports/summary", get(report_summary_handler::<S>))
        .route("/api-doc/openapi.json", get(openapi_handler))
        .with_state(service)
}

pub async fn setup_and_serve<S: BeneficiaryStore>(
    config: &Config,
    service: Arc<IntakeService<S>>,
) -> anyhow::Result<()> {
    let app = router(service)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .context("error binding listener")?;
    tracing::info!(
        "intake service is up and running with environment {:?} on port {}",
        config.environment,
        config.port
    );
    axum::serve(listener, app.into_make_service())
        .await
        .context("error starting service")
}
