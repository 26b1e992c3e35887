use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::auth::identity::CurrentUser;
use crate::auth::policy::Capability;
use crate::error::ApiError;
use crate::schemas::{UserCreate, UserOut};
use crate::services;
use crate::state::AppState;

pub(crate) fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(create))
        .route("/me", get(me))
}

async fn create(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    Json(payload): Json<UserCreate>,
) -> Result<(StatusCode, Json<UserOut>), ApiError> {
    current.require(Capability::AdminOnly)?;
    let user = services::users::create_user(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(UserOut::from(user))))
}

async fn me(current: CurrentUser) -> Json<UserOut> {
    Json(UserOut::from(current.0))
}
