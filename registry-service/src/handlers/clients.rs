use crate::dtos::{ClientProfile, MessageResponse, RegisterClientRequest};
use crate::models::Client;
use crate::services::enrollment::CLIENT_NOT_FOUND;
use crate::startup::AppState;
use crate::utils::{parse_object_id, JsonBody, ValidatedJson};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use metrics::counter;
use service_core::error::AppError;

pub async fn register_client(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterClientRequest>,
) -> Result<impl IntoResponse, AppError> {
    let client = Client::new(req.first_name, req.last_name, req.email);

    state.store.insert_client(&client).await?;

    counter!("registry_clients_registered_total").increment(1);
    tracing::info!(client_id = %client.id, "Client registered");

    let profile = state.profiles.assemble(client).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

pub async fn list_clients(
    State(state): State<AppState>,
) -> Result<Json<Vec<ClientProfile>>, AppError> {
    let clients = state.store.list_clients().await?;
    Ok(Json(state.profiles.assemble_all(clients).await?))
}

/// Serves both `/clients/:id` and the public
/// `/clients/api/client-profile/:id` path.
pub async fn get_client_profile(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> Result<Json<ClientProfile>, AppError> {
    let client_id = parse_object_id(&client_id)?;

    let client = state
        .store
        .find_client(&client_id)
        .await?
        .ok_or_else(|| AppError::not_found(CLIENT_NOT_FOUND))?;

    Ok(Json(state.profiles.assemble(client).await?))
}

pub async fn enroll_client(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
    JsonBody(program_ids): JsonBody<Vec<String>>,
) -> Result<Json<MessageResponse>, AppError> {
    state.enrollment.enroll(&client_id, &program_ids).await?;
    Ok(Json(MessageResponse::new(
        "Client enrolled in programs successfully",
    )))
}

pub async fn unenroll_client(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
    JsonBody(program_ids): JsonBody<Vec<String>>,
) -> Result<Json<MessageResponse>, AppError> {
    state.enrollment.unenroll(&client_id, &program_ids).await?;
    Ok(Json(MessageResponse::new(
        "Client unenrolled from programs successfully",
    )))
}
