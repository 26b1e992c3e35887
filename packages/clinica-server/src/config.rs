use std::net::SocketAddr;

use anyhow::{Context, Result};
use tracing::warn;

const DEFAULT_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_TOKEN_TTL_MINUTES: i64 = 30;

/// Configuração da aplicação, montada uma única vez em `main` e carregada
/// dentro do `AppState`. Prioridade: variável de ambiente > `.env` > padrão.
#[derive(Debug, Clone)]
pub(crate) struct AppConfig {
    pub(crate) secret_key: String,
    pub(crate) access_token_expire_minutes: i64,
    pub(crate) database_url: String,
    pub(crate) listen_addr: SocketAddr,
}

impl AppConfig {
    pub(crate) fn from_env() -> Result<Self> {
        let secret_key = std::env::var("CLINICA_SECRET_KEY").unwrap_or_else(|_| {
            warn!("CLINICA_SECRET_KEY não definida; usando chave padrão insegura");
            "valor_padrao_inseguro_mude_isso_no_env_ou_no_ambiente".to_string()
        });

        let access_token_expire_minutes = match std::env::var("CLINICA_TOKEN_TTL_MINUTES") {
            Ok(text) => text
                .parse()
                .with_context(|| format!("CLINICA_TOKEN_TTL_MINUTES inválido: {text}"))?,
            Err(_) => DEFAULT_TOKEN_TTL_MINUTES,
        };

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://clinica.db?mode=rwc".to_string());

        let addr_text = std::env::var("CLINICA_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
        let listen_addr = addr_text
            .parse()
            .with_context(|| format!("CLINICA_ADDR inválido: {addr_text}"))?;

        Ok(Self {
            secret_key,
            access_token_expire_minutes,
            database_url,
            listen_addr,
        })
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> AppConfig {
    AppConfig {
        secret_key: "segredo-de-teste-nao-use-em-producao".to_string(),
        access_token_expire_minutes: 30,
        database_url: "sqlite::memory:".to_string(),
        listen_addr: "127.0.0.1:0".parse().unwrap(),
    }
}
