use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::config::AppConfig;
use crate::error::ApiError;

/// Claims do token de acesso: `sub` carrega o id do usuário.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Claims {
    pub(crate) sub: String,
    pub(crate) exp: i64,
}

/// Emite um token HS256 com validade `access_token_expire_minutes`.
pub(crate) fn create_access_token(user_id: i32, config: &AppConfig) -> Result<String, ApiError> {
    let expires_at = Utc::now() + chrono::Duration::minutes(config.access_token_expire_minutes);
    let claims = Claims {
        sub: user_id.to_string(),
        exp: expires_at.timestamp(),
    };

    let header = Header::new(Algorithm::HS256);
    encode(
        &header,
        &claims,
        &EncodingKey::from_secret(config.secret_key.as_bytes()),
    )
    .map_err(|e| {
        error!(error = %e, "failed to encode access token");
        ApiError::TokenIssue
    })
}

/// Decodifica o token e devolve o id do usuário, ou `Unauthenticated` para
/// token malformado, com assinatura inválida ou expirado.
pub(crate) fn decode_token_sub(token: &str, config: &AppConfig) -> Result<i32, ApiError> {
    let validation = Validation::new(Algorithm::HS256);
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret_key.as_bytes()),
        &validation,
    )
    .map_err(|_| ApiError::Unauthenticated)?;

    data.claims
        .sub
        .parse()
        .map_err(|_| ApiError::Unauthenticated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;

    #[test]
    fn test_token_round_trip() {
        let config = test_config();
        let token = create_access_token(42, &config).unwrap();
        assert_eq!(decode_token_sub(&token, &config).unwrap(), 42);
    }

    #[test]
    fn test_token_expirado() {
        let mut config = test_config();
        // expirado há mais tempo que a tolerância padrão de relógio
        config.access_token_expire_minutes = -5;
        let token = create_access_token(42, &config).unwrap();
        assert!(matches!(
            decode_token_sub(&token, &config),
            Err(ApiError::Unauthenticated)
        ));
    }

    #[test]
    fn test_token_assinatura_invalida() {
        let config = test_config();
        let token = create_access_token(42, &config).unwrap();

        let mut outra = test_config();
        outra.secret_key = "outro-segredo-completamente-diferente".to_string();
        assert!(matches!(
            decode_token_sub(&token, &outra),
            Err(ApiError::Unauthenticated)
        ));
    }

    #[test]
    fn test_token_malformado() {
        let config = test_config();
        assert!(matches!(
            decode_token_sub("nao.e.um.jwt", &config),
            Err(ApiError::Unauthenticated)
        ));
    }
}
