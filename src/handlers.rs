use crate::config::Config;
use crate::db_storage::LeadStorage;
use crate::errors::{AppError, ResultExt};
use crate::extract::JsonOrForm;
use crate::models::*;
use crate::webhook_client::WebhookClient;
use crate::webhook_models::LeadKind;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Local;
use serde_json::json;
use std::sync::Arc;

const CREATE_RETIRED_ERROR: &str = "Erro ao criar lead de aposentadoria";
const FETCH_RETIRED_ERROR: &str = "Erro ao buscar lead de aposentadoria";
const RETIRED_NOT_FOUND: &str = "Lead de aposentadoria não encontrado";
const CREATE_ATHLETES_ERROR: &str = "Erro ao criar lead de direito dos atletas";
const FETCH_ATHLETES_ERROR: &str = "Erro ao buscar lead de direito dos atletas";
const ATHLETES_NOT_FOUND: &str = "Lead de direito dos atletas não encontrado";

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Lead and request-log storage.
    pub storage: LeadStorage,
    /// Application configuration.
    pub config: Config,
    /// Outbound webhook forwarding.
    pub webhooks: WebhookClient,
}

/// Health check endpoint.
///
/// Returns the service status and version.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, description = "Service is up"))
)]
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

fn parse_lead_id(raw: &str, error_message: &str) -> Result<i32, AppError> {
    raw.trim().parse::<i32>().map_err(|_| {
        tracing::warn!("Invalid lead id: {}", raw);
        AppError::BadRequest(error_message.to_string())
    })
}

/// POST /retired
///
/// Stores a retirement lead. The eligibility score and estimated benefit
/// date are computed from gender, birth date and contribution time before
/// the insert, using today's date read once here.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `payload` - JSON or URL-encoded lead form.
///
/// # Returns
///
/// * `Result<(StatusCode, Json<RetiredLead>), AppError>` - 201 with the stored lead, or 400.
#[utoipa::path(
    post,
    path = "/retired",
    tag = "Leads - Aposentadoria",
    request_body(content = CreateRetiredLead, description = "JSON or application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Lead created", body = RetiredLead),
        (status = 400, description = "Lead could not be stored", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = AuthErrorResponse)
    ),
    security(("bearer" = []))
)]
pub async fn create_retired_lead(
    State(state): State<Arc<AppState>>,
    JsonOrForm(payload): JsonOrForm<CreateRetiredLead>,
) -> Result<(StatusCode, Json<RetiredLead>), AppError> {
    tracing::info!("POST /retired - utm_source: {:?}", payload.utm_source);

    let today = Local::now().date_naive();
    let new_lead = payload.into_new_lead(today);

    let lead = state
        .storage
        .insert_retired(&new_lead)
        .await
        .or_bad_request(CREATE_RETIRED_ERROR)?;

    tracing::info!(
        "Retired lead {} created (score: {:?}, benefit date: {:?})",
        lead.id,
        lead.score,
        lead.date_benefit_was_granted
    );

    state.webhooks.dispatch(LeadKind::Retired, &lead);

    Ok((StatusCode::CREATED, Json(lead)))
}

/// GET /retired/:id
///
/// # Arguments
///
/// * `state` - The application state.
/// * `id` - Numeric lead id.
///
/// # Returns
///
/// * `Result<Json<RetiredLead>, AppError>` - The lead, 404 when absent, 400 on a bad id.
#[utoipa::path(
    get,
    path = "/retired/{id}",
    tag = "Leads - Aposentadoria",
    params(("id" = i32, Path, description = "Lead id")),
    responses(
        (status = 200, description = "Lead found", body = RetiredLead),
        (status = 400, description = "Invalid id or lookup failure", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = AuthErrorResponse),
        (status = 404, description = "Lead not found", body = MessageResponse)
    ),
    security(("bearer" = []))
)]
pub async fn get_retired_lead(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<RetiredLead>, AppError> {
    tracing::info!("GET /retired/{}", id);

    let id = parse_lead_id(&id, FETCH_RETIRED_ERROR)?;

    let lead = state
        .storage
        .find_retired(id)
        .await
        .or_bad_request(FETCH_RETIRED_ERROR)?
        .ok_or_else(|| AppError::NotFound(RETIRED_NOT_FOUND.to_string()))?;

    Ok(Json(lead))
}

/// POST /api/athletes-rights
///
/// Stores an athletes-rights lead and forwards it to the category webhook.
#[utoipa::path(
    post,
    path = "/api/athletes-rights",
    tag = "Leads - Direito dos Atletas",
    request_body(content = CreateAthletesRightsLead, description = "JSON or application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Lead created", body = AthletesRightsLead),
        (status = 400, description = "Lead could not be stored", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = AuthErrorResponse)
    ),
    security(("bearer" = []))
)]
pub async fn create_athletes_rights_lead(
    State(state): State<Arc<AppState>>,
    JsonOrForm(payload): JsonOrForm<CreateAthletesRightsLead>,
) -> Result<(StatusCode, Json<AthletesRightsLead>), AppError> {
    tracing::info!(
        "POST /api/athletes-rights - utm_source: {:?}",
        payload.utm_source
    );

    let lead = state
        .storage
        .insert_athletes_rights(&payload.normalized())
        .await
        .or_bad_request(CREATE_ATHLETES_ERROR)?;

    tracing::info!("Athletes-rights lead {} created", lead.id);

    state.webhooks.dispatch(LeadKind::AthletesRights, &lead);

    Ok((StatusCode::CREATED, Json(lead)))
}

/// GET /api/athletes-rights/:id
#[utoipa::path(
    get,
    path = "/api/athletes-rights/{id}",
    tag = "Leads - Direito dos Atletas",
    params(("id" = i32, Path, description = "Lead id")),
    responses(
        (status = 200, description = "Lead found", body = AthletesRightsLead),
        (status = 400, description = "Invalid id or lookup failure", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = AuthErrorResponse),
        (status = 404, description = "Lead not found", body = MessageResponse)
    ),
    security(("bearer" = []))
)]
pub async fn get_athletes_rights_lead(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<AthletesRightsLead>, AppError> {
    tracing::info!("GET /api/athletes-rights/{}", id);

    let id = parse_lead_id(&id, FETCH_ATHLETES_ERROR)?;

    let lead = state
        .storage
        .find_athletes_rights(id)
        .await
        .or_bad_request(FETCH_ATHLETES_ERROR)?
        .ok_or_else(|| AppError::NotFound(ATHLETES_NOT_FOUND.to_string()))?;

    Ok(Json(lead))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lead_id() {
        assert_eq!(parse_lead_id("42", FETCH_RETIRED_ERROR).unwrap(), 42);
        assert_eq!(parse_lead_id(" 7 ", FETCH_RETIRED_ERROR).unwrap(), 7);

        match parse_lead_id("abc", FETCH_RETIRED_ERROR) {
            Err(AppError::BadRequest(msg)) => assert_eq!(msg, FETCH_RETIRED_ERROR),
            other => panic!("expected bad request, got {:?}", other),
        }
        assert!(parse_lead_id("99999999999", FETCH_ATHLETES_ERROR).is_err());
    }
}
