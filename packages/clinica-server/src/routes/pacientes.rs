use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use clinica_core::Paginacao;

use crate::auth::identity::CurrentUser;
use crate::auth::policy::Capability;
use crate::error::ApiError;
use crate::schemas::{PacienteCreate, PacienteOut, PacienteUpdate};
use crate::services;
use crate::state::AppState;

pub(crate) fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(get_one).put(update).delete(delete))
        .route("/cpf/{cpf}", get(get_by_cpf))
        .route("/cns/{cns}", get(get_by_cns))
}

async fn create(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    Json(payload): Json<PacienteCreate>,
) -> Result<(StatusCode, Json<PacienteOut>), ApiError> {
    current.require(Capability::SecretariaOrAbove)?;
    let paciente = services::pacientes::create(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(paciente)))
}

async fn list(
    State(state): State<Arc<AppState>>,
    _current: CurrentUser,
    Query(paginacao): Query<Paginacao>,
) -> Result<Json<Vec<PacienteOut>>, ApiError> {
    Ok(Json(services::pacientes::list(&state.db, paginacao).await?))
}

async fn get_one(
    State(state): State<Arc<AppState>>,
    _current: CurrentUser,
    Path(id): Path<i32>,
) -> Result<Json<PacienteOut>, ApiError> {
    Ok(Json(services::pacientes::get_by_id(&state.db, id).await?))
}

async fn get_by_cpf(
    State(state): State<Arc<AppState>>,
    _current: CurrentUser,
    Path(cpf): Path<String>,
) -> Result<Json<PacienteOut>, ApiError> {
    Ok(Json(services::pacientes::get_by_cpf(&state.db, &cpf).await?))
}

async fn get_by_cns(
    State(state): State<Arc<AppState>>,
    _current: CurrentUser,
    Path(cns): Path<String>,
) -> Result<Json<PacienteOut>, ApiError> {
    Ok(Json(services::pacientes::get_by_cns(&state.db, &cns).await?))
}

async fn update(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    Path(id): Path<i32>,
    Json(payload): Json<PacienteUpdate>,
) -> Result<Json<PacienteOut>, ApiError> {
    current.require(Capability::SecretariaOrAbove)?;
    Ok(Json(
        services::pacientes::update(&state.db, id, payload).await?,
    ))
}

async fn delete(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    current.require(Capability::AdminOnly)?;
    services::pacientes::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
