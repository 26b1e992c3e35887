//! Provisionamento e autenticação de usuários.

use clinica_core::Token;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use tracing::info;

use crate::auth::{password, policy, token};
use crate::config::AppConfig;
use crate::db::users::UserRole;
use crate::db::{medicos, users};
use crate::error::{ApiError, unique_violation};
use crate::schemas::UserCreate;

/// Cria um usuário aplicando as regras de vínculo com médico.
///
/// O vínculo `medico_id` é obrigatório para o papel `medico` e proibido
/// para os demais. `is_superuser` é derivado do papel, nunca do payload.
pub(crate) async fn create_user(
    db: &DatabaseConnection,
    payload: UserCreate,
) -> Result<users::Model, ApiError> {
    if payload.password.chars().count() < 8 {
        return Err(ApiError::PasswordTooShort);
    }

    // email duplicado vence sobre problemas de vínculo no mesmo payload
    if users::Entity::find()
        .filter(users::Column::Email.eq(payload.email.as_str()))
        .one(db)
        .await?
        .is_some()
    {
        return Err(ApiError::EmailAlreadyRegistered);
    }

    match (payload.role, payload.medico_id) {
        (UserRole::Medico, None) => return Err(ApiError::MissingMedicoLink),
        (UserRole::Medico, Some(medico_id)) => {
            medicos::Entity::find_by_id(medico_id)
                .one(db)
                .await?
                .ok_or(ApiError::MedicoNotFound(medico_id))?;
        }
        (_, Some(_)) => return Err(ApiError::UnexpectedMedicoLink),
        (_, None) => {}
    }

    let hashed = password::hash_password(&payload.password)?;

    let user = users::ActiveModel {
        email: Set(payload.email),
        hashed_password: Set(hashed),
        nome_completo: Set(payload.nome_completo),
        role: Set(payload.role),
        is_active: Set(true),
        is_superuser: Set(payload.role == UserRole::Admin),
        medico_id: Set(payload.medico_id),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|e| unique_violation(e, ApiError::EmailAlreadyRegistered))?;

    info!(user_id = user.id, email = %user.email, "user created");
    Ok(user)
}

/// Autentica por email e senha e emite o token de acesso.
///
/// Email desconhecido e senha errada produzem o mesmo erro, para não
/// revelar quais emails estão cadastrados.
pub(crate) async fn authenticate(
    db: &DatabaseConnection,
    config: &AppConfig,
    email: &str,
    senha: &str,
) -> Result<Token, ApiError> {
    let user = users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(db)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    if !password::verify_password(senha, &user.hashed_password)? {
        return Err(ApiError::InvalidCredentials);
    }
    let user = policy::require_active(user)?;

    let access_token = token::create_access_token(user.id, config)?;
    Ok(Token::bearer(access_token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use crate::db::test_connection;

    fn payload(role: UserRole, medico_id: Option<i32>) -> UserCreate {
        UserCreate {
            email: "pessoa@clinica.com".to_string(),
            nome_completo: "Pessoa de Teste".to_string(),
            password: "senhaForte123".to_string(),
            role,
            medico_id,
        }
    }

    async fn insert_medico(db: &DatabaseConnection) -> medicos::Model {
        medicos::ActiveModel {
            nome: Set("Dra. Ana Souza".to_string()),
            especialidade: Set("Cardiologia".to_string()),
            telefone: Set("1132345678".to_string()),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_secretaria() {
        let db = test_connection().await;
        let user = create_user(&db, payload(UserRole::Secretaria, None))
            .await
            .unwrap();
        assert_eq!(user.role, UserRole::Secretaria);
        assert!(user.is_active);
        assert!(!user.is_superuser);
        assert!(user.medico_id.is_none());
        assert_ne!(user.hashed_password, "senhaForte123");
    }

    #[tokio::test]
    async fn test_create_admin_vira_superuser() {
        let db = test_connection().await;
        let user = create_user(&db, payload(UserRole::Admin, None)).await.unwrap();
        assert!(user.is_superuser);
    }

    #[tokio::test]
    async fn test_senha_curta() {
        let db = test_connection().await;
        let mut curto = payload(UserRole::Secretaria, None);
        curto.password = "curta12".to_string();
        assert!(matches!(
            create_user(&db, curto).await,
            Err(ApiError::PasswordTooShort)
        ));
    }

    #[tokio::test]
    async fn test_email_duplicado() {
        let db = test_connection().await;
        create_user(&db, payload(UserRole::Secretaria, None))
            .await
            .unwrap();
        assert!(matches!(
            create_user(&db, payload(UserRole::Admin, None)).await,
            Err(ApiError::EmailAlreadyRegistered)
        ));
    }

    #[tokio::test]
    async fn test_email_duplicado_precede_regras_de_vinculo() {
        let db = test_connection().await;
        create_user(&db, payload(UserRole::Secretaria, None))
            .await
            .unwrap();

        // payload errado nos dois pontos: reporta o email, não o vínculo
        assert!(matches!(
            create_user(&db, payload(UserRole::Medico, None)).await,
            Err(ApiError::EmailAlreadyRegistered)
        ));
    }

    #[tokio::test]
    async fn test_medico_exige_vinculo() {
        let db = test_connection().await;
        assert!(matches!(
            create_user(&db, payload(UserRole::Medico, None)).await,
            Err(ApiError::MissingMedicoLink)
        ));
    }

    #[tokio::test]
    async fn test_vinculo_exige_papel_medico() {
        let db = test_connection().await;
        let medico = insert_medico(&db).await;
        assert!(matches!(
            create_user(&db, payload(UserRole::Secretaria, Some(medico.id))).await,
            Err(ApiError::UnexpectedMedicoLink)
        ));
    }

    #[tokio::test]
    async fn test_vinculo_com_medico_inexistente() {
        let db = test_connection().await;
        assert!(matches!(
            create_user(&db, payload(UserRole::Medico, Some(99))).await,
            Err(ApiError::MedicoNotFound(99))
        ));
    }

    #[tokio::test]
    async fn test_create_medico_com_vinculo() {
        let db = test_connection().await;
        let medico = insert_medico(&db).await;
        let user = create_user(&db, payload(UserRole::Medico, Some(medico.id)))
            .await
            .unwrap();
        assert_eq!(user.medico_id, Some(medico.id));
        assert!(!user.is_superuser);
    }

    #[tokio::test]
    async fn test_authenticate() {
        let db = test_connection().await;
        let config = test_config();
        create_user(&db, payload(UserRole::Secretaria, None))
            .await
            .unwrap();

        let token = authenticate(&db, &config, "pessoa@clinica.com", "senhaForte123")
            .await
            .unwrap();
        assert_eq!(token.token_type, "bearer");
        assert!(!token.access_token.is_empty());
    }

    #[tokio::test]
    async fn test_authenticate_credenciais_invalidas() {
        let db = test_connection().await;
        let config = test_config();
        create_user(&db, payload(UserRole::Secretaria, None))
            .await
            .unwrap();

        assert!(matches!(
            authenticate(&db, &config, "pessoa@clinica.com", "senhaErrada").await,
            Err(ApiError::InvalidCredentials)
        ));
        assert!(matches!(
            authenticate(&db, &config, "ninguem@clinica.com", "senhaForte123").await,
            Err(ApiError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_authenticate_conta_inativa() {
        let db = test_connection().await;
        let config = test_config();
        let user = create_user(&db, payload(UserRole::Secretaria, None))
            .await
            .unwrap();

        let mut inativo: users::ActiveModel = user.into();
        inativo.is_active = Set(false);
        inativo.update(&db).await.unwrap();

        assert!(matches!(
            authenticate(&db, &config, "pessoa@clinica.com", "senhaForte123").await,
            Err(ApiError::InactiveAccount)
        ));
    }
}
