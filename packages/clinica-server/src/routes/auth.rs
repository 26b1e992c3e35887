use std::sync::Arc;

use axum::Json;
use axum::extract::{Form, State};
use clinica_core::Token;

use crate::error::ApiError;
use crate::schemas::LoginForm;
use crate::services;
use crate::state::AppState;

/// Login compatível com o fluxo OAuth2 password: aceita `username` e
/// `password` como formulário e devolve um bearer token.
pub(crate) async fn login(
    State(state): State<Arc<AppState>>,
    Form(form): Form<LoginForm>,
) -> Result<Json<Token>, ApiError> {
    let token =
        services::users::authenticate(&state.db, &state.config, &form.username, &form.password)
            .await?;
    Ok(Json(token))
}
