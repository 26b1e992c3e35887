use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use clinica_core::validation::ValidationError;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;
use tracing::error;

/// Erros de domínio expostos pela API.
///
/// Cada variante mapeia para uma classe de status estável; detalhes do banco
/// nunca vazam para a resposta. Violações de restrição do banco são
/// traduzidas pelos serviços para a variante de domínio correspondente
/// (ver [`unique_violation`] e [`reference_violation`]).
#[derive(Debug, Error)]
pub(crate) enum ApiError {
    #[error("não autenticado")]
    Unauthenticated,
    #[error("email ou senha incorretos")]
    InvalidCredentials,
    #[error("usuário inativo")]
    InactiveAccount,
    #[error("acesso negado: privilégios insuficientes")]
    Forbidden,
    #[error("configuração inválida: usuário sem perfil de médico associado")]
    InvalidAccountConfiguration,

    #[error("{0} não encontrado")]
    NotFound(&'static str),
    #[error("paciente com id {0} não encontrado")]
    PacienteNotFound(i32),
    #[error("médico com id {0} não encontrado")]
    MedicoNotFound(i32),

    #[error("um usuário com este email já existe")]
    EmailAlreadyRegistered,
    #[error("para usuários com papel 'medico', 'medico_id' é obrigatório")]
    MissingMedicoLink,
    #[error("o 'medico_id' só é aplicável para usuários com papel 'medico'")]
    UnexpectedMedicoLink,
    #[error("a senha deve ter pelo menos 8 caracteres")]
    PasswordTooShort,

    #[error("CPF já cadastrado no sistema")]
    CpfAlreadyRegistered,
    #[error("CNS já cadastrado no sistema")]
    CnsAlreadyRegistered,
    #[error("já existe um médico cadastrado com este nome")]
    MedicoNameTaken,

    #[error("CPF inválido")]
    InvalidCpf,
    #[error("CNS inválido")]
    InvalidCns,
    #[error("telefone inválido: deve conter 10 ou 11 dígitos (DDD + número)")]
    InvalidTelefone,
    #[error("endereço inválido: {0}")]
    InvalidEndereco(&'static str),
    #[error("o valor da consulta deve ser maior que zero")]
    InvalidValorConsulta,

    #[error("registro referenciado por outros dados não pode ser removido")]
    ReferencedRecord,

    #[error("falha ao processar a senha")]
    PasswordHash,
    #[error("falha ao emitir o token de acesso")]
    TokenIssue,
    #[error(transparent)]
    Db(#[from] DbErr),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        use ApiError::*;
        match self {
            Unauthenticated | InvalidCredentials => StatusCode::UNAUTHORIZED,
            Forbidden | InvalidAccountConfiguration => StatusCode::FORBIDDEN,
            NotFound(_) | PacienteNotFound(_) | MedicoNotFound(_) => StatusCode::NOT_FOUND,
            InactiveAccount
            | EmailAlreadyRegistered
            | MissingMedicoLink
            | UnexpectedMedicoLink
            | PasswordTooShort
            | CpfAlreadyRegistered
            | CnsAlreadyRegistered
            | MedicoNameTaken
            | InvalidCpf
            | InvalidCns
            | InvalidTelefone
            | InvalidEndereco(_)
            | InvalidValorConsulta
            | ReferencedRecord => StatusCode::BAD_REQUEST,
            PasswordHash | TokenIssue | Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %self, "internal error");
            return (
                status,
                Json(serde_json::json!({ "detail": "erro interno do servidor" })),
            )
                .into_response();
        }
        (status, Json(serde_json::json!({ "detail": self.to_string() }))).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::Cpf => ApiError::InvalidCpf,
            ValidationError::Cns => ApiError::InvalidCns,
            ValidationError::Telefone => ApiError::InvalidTelefone,
            ValidationError::Cep => ApiError::InvalidEndereco("CEP deve ter o formato 00000-000"),
            ValidationError::Estado => {
                ApiError::InvalidEndereco("estado deve ser a sigla de 2 letras (UF)")
            }
        }
    }
}

/// Traduz a violação de unicidade do banco para o erro de duplicidade do
/// domínio. Os serviços fazem pré-checagens, mas a restrição do banco é a
/// fonte de verdade quando uma inserção concorrente vence a corrida.
pub(crate) fn unique_violation(err: DbErr, on_duplicate: ApiError) -> ApiError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => on_duplicate,
        _ => ApiError::Db(err),
    }
}

/// Traduz violação de chave estrangeira em remoções (registro ainda
/// referenciado por agendamentos ou usuários).
pub(crate) fn reference_violation(err: DbErr) -> ApiError {
    match err.sql_err() {
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => ApiError::ReferencedRecord,
        _ => ApiError::Db(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::Unauthenticated.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::InvalidCredentials.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::InvalidAccountConfiguration.status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::PacienteNotFound(7).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(ApiError::InactiveAccount.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::CpfAlreadyRegistered.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Db(DbErr::Custom("x".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_error_conversion() {
        assert!(matches!(
            ApiError::from(ValidationError::Cpf),
            ApiError::InvalidCpf
        ));
        assert!(matches!(
            ApiError::from(ValidationError::Cep),
            ApiError::InvalidEndereco(_)
        ));
    }
}
