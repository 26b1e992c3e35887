pub mod validation;

use serde::{Deserialize, Serialize};

/// Token de acesso devolvido pelo login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
}

impl Token {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// Parâmetros de paginação aceitos pelos endpoints de listagem.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Paginacao {
    #[serde(default)]
    pub skip: u64,
    #[serde(default = "limite_padrao")]
    pub limit: u64,
}

fn limite_padrao() -> u64 {
    100
}

impl Default for Paginacao {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: limite_padrao(),
        }
    }
}
