//! Corpos de requisição e resposta da API.
//!
//! Nos payloads de atualização, `Option` significa "campo não enviado":
//! campos ausentes ficam intactos, nunca são anulados.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::db::{agendamentos, enderecos, medicos, pacientes, users};

// ---- Endereço ----

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct EnderecoCreate {
    pub rua: String,
    #[serde(default)]
    pub numero: Option<String>,
    pub bairro: String,
    pub cidade: String,
    pub estado: String,
    pub cep: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct EnderecoUpdate {
    pub rua: Option<String>,
    pub numero: Option<String>,
    pub bairro: Option<String>,
    pub cidade: Option<String>,
    pub estado: Option<String>,
    pub cep: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct EnderecoOut {
    pub id: i32,
    pub rua: String,
    pub numero: Option<String>,
    pub bairro: String,
    pub cidade: String,
    pub estado: String,
    pub cep: String,
}

impl From<enderecos::Model> for EnderecoOut {
    fn from(model: enderecos::Model) -> Self {
        Self {
            id: model.id,
            rua: model.rua,
            numero: model.numero,
            bairro: model.bairro,
            cidade: model.cidade,
            estado: model.estado,
            cep: model.cep,
        }
    }
}

// ---- Paciente ----

#[derive(Debug, Deserialize)]
pub(crate) struct PacienteCreate {
    pub nome_completo: String,
    pub data_nascimento: NaiveDate,
    pub nome_da_mae: String,
    pub cpf: String,
    #[serde(default)]
    pub cns: Option<String>,
    pub telefone: String,
    pub endereco: EnderecoCreate,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PacienteUpdate {
    pub telefone: Option<String>,
    pub endereco: Option<EnderecoUpdate>,
}

#[derive(Debug, Serialize)]
pub(crate) struct PacienteOut {
    pub id: i32,
    pub nome_completo: String,
    pub data_nascimento: NaiveDate,
    pub nome_da_mae: String,
    pub cpf: String,
    pub cns: Option<String>,
    pub telefone: String,
    pub endereco: Option<EnderecoOut>,
}

impl PacienteOut {
    pub(crate) fn from_parts(
        paciente: pacientes::Model,
        endereco: Option<enderecos::Model>,
    ) -> Self {
        Self {
            id: paciente.id,
            nome_completo: paciente.nome_completo,
            data_nascimento: paciente.data_nascimento,
            nome_da_mae: paciente.nome_da_mae,
            cpf: paciente.cpf,
            cns: paciente.cns,
            telefone: paciente.telefone,
            endereco: endereco.map(EnderecoOut::from),
        }
    }
}

// ---- Médico ----

#[derive(Debug, Deserialize)]
pub(crate) struct MedicoCreate {
    pub nome: String,
    pub especialidade: String,
    pub telefone: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct MedicoUpdate {
    pub especialidade: Option<String>,
    pub telefone: Option<String>,
}

/// Resumo do médico embutido nas respostas de agendamento.
#[derive(Debug, Serialize)]
pub(crate) struct MedicoResumo {
    pub id: i32,
    pub nome: String,
    pub especialidade: String,
}

impl From<medicos::Model> for MedicoResumo {
    fn from(model: medicos::Model) -> Self {
        Self {
            id: model.id,
            nome: model.nome,
            especialidade: model.especialidade,
        }
    }
}

// ---- Agendamento ----

#[derive(Debug, Deserialize)]
pub(crate) struct AgendamentoCreate {
    pub paciente_id: i32,
    pub medico_id: i32,
    pub especialidade: String,
    pub data_primeira_consulta: NaiveDate,
    #[serde(default)]
    pub data_proxima_consulta: Option<NaiveDate>,
    pub valor_consulta: Decimal,
    #[serde(default)]
    pub descricao: Option<String>,
    #[serde(default)]
    pub receituario: Option<String>,
}

/// Atualização parcial de agendamento.
///
/// `paciente_id` é imutável: o campo não existe aqui e
/// `deny_unknown_fields` rejeita payloads que tentem enviá-lo.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct AgendamentoUpdate {
    pub medico_id: Option<i32>,
    pub especialidade: Option<String>,
    pub data_primeira_consulta: Option<NaiveDate>,
    pub data_proxima_consulta: Option<NaiveDate>,
    pub valor_consulta: Option<Decimal>,
    pub descricao: Option<String>,
    pub receituario: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AgendamentoOut {
    pub id: i32,
    pub paciente_id: i32,
    pub medico_id: i32,
    pub especialidade: String,
    pub data_primeira_consulta: NaiveDate,
    pub data_proxima_consulta: Option<NaiveDate>,
    pub valor_consulta: Decimal,
    pub descricao: Option<String>,
    pub receituario: Option<String>,
    pub medico: MedicoResumo,
}

impl AgendamentoOut {
    pub(crate) fn from_parts(agendamento: agendamentos::Model, medico: medicos::Model) -> Self {
        Self {
            id: agendamento.id,
            paciente_id: agendamento.paciente_id,
            medico_id: agendamento.medico_id,
            especialidade: agendamento.especialidade,
            data_primeira_consulta: agendamento.data_primeira_consulta,
            data_proxima_consulta: agendamento.data_proxima_consulta,
            valor_consulta: agendamento.valor_consulta,
            descricao: agendamento.descricao,
            receituario: agendamento.receituario,
            medico: MedicoResumo::from(medico),
        }
    }
}

// ---- Usuário ----

#[derive(Debug, Deserialize)]
pub(crate) struct UserCreate {
    pub email: String,
    pub nome_completo: String,
    pub password: String,
    pub role: users::UserRole,
    #[serde(default)]
    pub medico_id: Option<i32>,
}

/// Visão pública do usuário: nunca inclui o hash da senha.
#[derive(Debug, Serialize)]
pub(crate) struct UserOut {
    pub id: i32,
    pub email: String,
    pub nome_completo: String,
    pub role: users::UserRole,
    pub is_active: bool,
    pub is_superuser: bool,
    pub medico_id: Option<i32>,
}

impl From<users::Model> for UserOut {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            nome_completo: model.nome_completo,
            role: model.role,
            is_active: model.is_active,
            is_superuser: model.is_superuser,
            medico_id: model.medico_id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginForm {
    pub username: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paciente_update_campos_ausentes() {
        let update: PacienteUpdate = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(update.telefone.is_none());
        assert!(update.endereco.is_none());
    }

    #[test]
    fn test_agendamento_update_rejeita_paciente_id() {
        let result: Result<AgendamentoUpdate, _> = serde_json::from_value(serde_json::json!({
            "paciente_id": 2,
            "descricao": "Retorno"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_agendamento_update_aceita_campos_conhecidos() {
        let update: AgendamentoUpdate = serde_json::from_value(serde_json::json!({
            "medico_id": 3,
            "valor_consulta": "200.00"
        }))
        .unwrap();
        assert_eq!(update.medico_id, Some(3));
        assert_eq!(update.valor_consulta.unwrap().to_string(), "200.00");
        assert!(update.especialidade.is_none());
    }

    #[test]
    fn test_valor_consulta_preserva_duas_casas() {
        let create: AgendamentoCreate = serde_json::from_value(serde_json::json!({
            "paciente_id": 1,
            "medico_id": 1,
            "especialidade": "Cardiologia",
            "data_primeira_consulta": "2024-12-31",
            "valor_consulta": 150.75
        }))
        .unwrap();
        assert_eq!(create.valor_consulta.to_string(), "150.75");
        let out = serde_json::to_value(create.valor_consulta).unwrap();
        assert_eq!(out, serde_json::json!("150.75"));
    }
}
