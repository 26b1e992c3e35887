use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use clinica_core::Paginacao;

use crate::auth::identity::CurrentUser;
use crate::auth::policy::Capability;
use crate::error::ApiError;
use crate::schemas::{AgendamentoCreate, AgendamentoOut, AgendamentoUpdate};
use crate::services;
use crate::state::AppState;

pub(crate) fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(get_one).put(update).delete(delete))
        .route("/paciente/{paciente_id}", get(list_by_paciente))
}

async fn create(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    Json(payload): Json<AgendamentoCreate>,
) -> Result<(StatusCode, Json<AgendamentoOut>), ApiError> {
    current.require(Capability::SecretariaOrAbove)?;
    let agendamento = services::agendamentos::create(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(agendamento)))
}

async fn list(
    State(state): State<Arc<AppState>>,
    _current: CurrentUser,
    Query(paginacao): Query<Paginacao>,
) -> Result<Json<Vec<AgendamentoOut>>, ApiError> {
    Ok(Json(
        services::agendamentos::list(&state.db, paginacao).await?,
    ))
}

async fn list_by_paciente(
    State(state): State<Arc<AppState>>,
    _current: CurrentUser,
    Path(paciente_id): Path<i32>,
    Query(paginacao): Query<Paginacao>,
) -> Result<Json<Vec<AgendamentoOut>>, ApiError> {
    Ok(Json(
        services::agendamentos::list_by_paciente(&state.db, paciente_id, paginacao).await?,
    ))
}

async fn get_one(
    State(state): State<Arc<AppState>>,
    _current: CurrentUser,
    Path(id): Path<i32>,
) -> Result<Json<AgendamentoOut>, ApiError> {
    Ok(Json(
        services::agendamentos::get_by_id(&state.db, id).await?,
    ))
}

async fn update(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    Path(id): Path<i32>,
    Json(payload): Json<AgendamentoUpdate>,
) -> Result<Json<AgendamentoOut>, ApiError> {
    current.require(Capability::SecretariaOrAbove)?;
    Ok(Json(
        services::agendamentos::update(&state.db, id, payload).await?,
    ))
}

async fn delete(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    current.require(Capability::AdminOnly)?;
    services::agendamentos::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
