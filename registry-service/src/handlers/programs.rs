use crate::dtos::{
    ClientRecordResponse, CreateProgramRequest, EnrollClientParams, EnrollmentResponse,
    MessageResponse, ProgramResponse,
};
use crate::models::Program;
use crate::services::enrollment::PROGRAM_NOT_FOUND;
use crate::startup::AppState;
use crate::utils::{parse_object_id, QueryParams, ValidatedJson};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use metrics::counter;
use service_core::error::AppError;

pub async fn create_program(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateProgramRequest>,
) -> Result<impl IntoResponse, AppError> {
    let program = Program::new(req.name, req.description);

    state.store.insert_program(&program).await?;

    counter!("registry_programs_created_total").increment(1);
    tracing::info!(program_id = %program.id, name = %program.name, "Program created");

    Ok((StatusCode::CREATED, Json(ProgramResponse::from(program))))
}

pub async fn list_programs(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProgramResponse>>, AppError> {
    let programs = state.store.list_programs().await?;
    Ok(Json(
        programs.into_iter().map(ProgramResponse::from).collect(),
    ))
}

pub async fn get_program(
    State(state): State<AppState>,
    Path(program_id): Path<String>,
) -> Result<Json<ProgramResponse>, AppError> {
    let program_id = parse_object_id(&program_id)?;

    let program = state
        .store
        .find_program(&program_id)
        .await?
        .ok_or_else(|| AppError::not_found(PROGRAM_NOT_FOUND))?;

    Ok(Json(ProgramResponse::from(program)))
}

pub async fn enroll_client_in_program(
    State(state): State<AppState>,
    Path(program_id): Path<String>,
    QueryParams(params): QueryParams<EnrollClientParams>,
) -> Result<Json<EnrollmentResponse>, AppError> {
    let client = state
        .enrollment
        .enroll_single(&program_id, &params.client_id)
        .await?;

    Ok(Json(EnrollmentResponse {
        message: "Successfully enrolled".to_string(),
        client: ClientRecordResponse::from(client),
    }))
}

pub async fn delete_program(
    State(state): State<AppState>,
    Path(program_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    state.enrollment.delete_program(&program_id).await?;
    Ok(Json(MessageResponse::new("Program deleted successfully")))
}
