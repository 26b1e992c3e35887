use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use sea_orm::{DatabaseConnection, EntityTrait};

use crate::auth::policy::{self, Capability};
use crate::auth::token;
use crate::config::AppConfig;
use crate::db::users;
use crate::error::ApiError;
use crate::state::AppState;

/// Usuário autenticado e ativo, resolvido a partir do bearer token.
///
/// Handlers protegidos recebem um `CurrentUser` e declaram a capacidade
/// exigida com [`CurrentUser::require`].
pub(crate) struct CurrentUser(pub(crate) users::Model);

impl CurrentUser {
    pub(crate) fn require(&self, capability: Capability) -> Result<(), ApiError> {
        policy::require_capability(&self.0, capability)
    }
}

/// Extrai o token do cabeçalho `Authorization: Bearer <token>`.
pub(crate) fn bearer_token(parts: &Parts) -> Result<&str, ApiError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(ApiError::Unauthenticated)?;

    header
        .strip_prefix("Bearer ")
        .ok_or(ApiError::Unauthenticated)
}

/// Resolve o token para o usuário correspondente. Token inválido, expirado
/// ou apontando para um usuário inexistente resultam em `Unauthenticated`.
pub(crate) async fn resolve_user(
    db: &DatabaseConnection,
    config: &AppConfig,
    token: &str,
) -> Result<users::Model, ApiError> {
    let user_id = token::decode_token_sub(token, config)?;
    users::Entity::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or(ApiError::Unauthenticated)
}

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?.to_owned();
        let user = resolve_user(&state.db, &state.config, &token).await?;
        let user = policy::require_active(user)?;
        Ok(CurrentUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use crate::db::users::UserRole;
    use sea_orm::{ActiveModelTrait, Set};

    async fn insert_user(db: &DatabaseConnection, is_active: bool) -> users::Model {
        users::ActiveModel {
            email: Set("ativa@example.com".to_string()),
            hashed_password: Set("$2b$12$hash".to_string()),
            nome_completo: Set("Conta de Teste".to_string()),
            role: Set(UserRole::Secretaria),
            is_active: Set(is_active),
            is_superuser: Set(false),
            medico_id: Set(None),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap()
    }

    #[test]
    fn test_bearer_token() {
        let request = axum::http::Request::builder()
            .header(AUTHORIZATION, "Bearer abc.def.ghi")
            .body(())
            .unwrap();
        let (parts, _) = request.into_parts();
        assert_eq!(bearer_token(&parts).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_bearer_token_ausente_ou_malformado() {
        let request = axum::http::Request::builder().body(()).unwrap();
        let (parts, _) = request.into_parts();
        assert!(matches!(
            bearer_token(&parts),
            Err(ApiError::Unauthenticated)
        ));

        let request = axum::http::Request::builder()
            .header(AUTHORIZATION, "Basic abc")
            .body(())
            .unwrap();
        let (parts, _) = request.into_parts();
        assert!(matches!(
            bearer_token(&parts),
            Err(ApiError::Unauthenticated)
        ));
    }

    #[tokio::test]
    async fn test_resolve_user() {
        let db = crate::db::test_connection().await;
        let config = test_config();
        let user = insert_user(&db, true).await;

        let token = token::create_access_token(user.id, &config).unwrap();
        let resolved = resolve_user(&db, &config, &token).await.unwrap();
        assert_eq!(resolved.id, user.id);
        assert_eq!(resolved.email, "ativa@example.com");
    }

    #[tokio::test]
    async fn test_resolve_user_inexistente() {
        let db = crate::db::test_connection().await;
        let config = test_config();

        let token = token::create_access_token(999, &config).unwrap();
        assert!(matches!(
            resolve_user(&db, &config, &token).await,
            Err(ApiError::Unauthenticated)
        ));
    }
}
