use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use clinica_core::Paginacao;

use crate::auth::identity::CurrentUser;
use crate::auth::policy::Capability;
use crate::db::medicos;
use crate::error::ApiError;
use crate::schemas::{MedicoCreate, MedicoUpdate};
use crate::services;
use crate::state::AppState;

pub(crate) fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(get_one).put(update).delete(delete))
}

async fn create(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    Json(payload): Json<MedicoCreate>,
) -> Result<(StatusCode, Json<medicos::Model>), ApiError> {
    current.require(Capability::AdminOnly)?;
    let medico = services::medicos::create(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(medico)))
}

async fn list(
    State(state): State<Arc<AppState>>,
    _current: CurrentUser,
    Query(paginacao): Query<Paginacao>,
) -> Result<Json<Vec<medicos::Model>>, ApiError> {
    Ok(Json(services::medicos::list(&state.db, paginacao).await?))
}

async fn get_one(
    State(state): State<Arc<AppState>>,
    _current: CurrentUser,
    Path(id): Path<i32>,
) -> Result<Json<medicos::Model>, ApiError> {
    Ok(Json(services::medicos::get_by_id(&state.db, id).await?))
}

async fn update(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    Path(id): Path<i32>,
    Json(payload): Json<MedicoUpdate>,
) -> Result<Json<medicos::Model>, ApiError> {
    current.require(Capability::SecretariaOrAbove)?;
    Ok(Json(
        services::medicos::update(&state.db, id, payload).await?,
    ))
}

async fn delete(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    current.require(Capability::AdminOnly)?;
    services::medicos::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
