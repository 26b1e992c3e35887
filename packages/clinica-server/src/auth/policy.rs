use crate::db::users::{Model as User, UserRole};
use crate::error::ApiError;

/// Capacidades abstratas verificadas contra papel e flags do usuário.
///
/// A tabela de política vive inteira em [`require_capability`]; os handlers
/// declaram a capacidade exigida em vez de repetir comparações de papel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Capability {
    /// Somente administradores: papel `admin` E `is_superuser`.
    AdminOnly,
    /// Secretária ou acima: papel `secretaria` OU superusuário.
    SecretariaOrAbove,
    /// Médico ou acima: papel `medico` com perfil vinculado, OU admin
    /// superusuário.
    MedicoOrAbove,
}

/// Garante que a conta está ativa antes de qualquer decisão de acesso.
pub(crate) fn require_active(user: User) -> Result<User, ApiError> {
    if !user.is_active {
        return Err(ApiError::InactiveAccount);
    }
    Ok(user)
}

/// Decide se o usuário satisfaz a capacidade exigida.
///
/// Um usuário com papel `medico` sem `medico_id` é um erro de configuração
/// da conta, distinto de simples falta de privilégio.
pub(crate) fn require_capability(user: &User, capability: Capability) -> Result<(), ApiError> {
    let is_admin = user.role == UserRole::Admin && user.is_superuser;
    let allowed = match capability {
        Capability::AdminOnly => is_admin,
        Capability::SecretariaOrAbove => user.role == UserRole::Secretaria || user.is_superuser,
        Capability::MedicoOrAbove => {
            if user.role == UserRole::Medico {
                if user.medico_id.is_none() {
                    return Err(ApiError::InvalidAccountConfiguration);
                }
                true
            } else {
                is_admin
            }
        }
    };

    if allowed {
        Ok(())
    } else {
        Err(ApiError::Forbidden)
    }
}
