//! Agendamentos de consulta.

use clinica_core::Paginacao;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use tracing::info;

use crate::db::{agendamentos, medicos, pacientes};
use crate::error::ApiError;
use crate::schemas::{AgendamentoCreate, AgendamentoOut, AgendamentoUpdate};

/// Valores monetários são persistidos com duas casas decimais.
fn check_valor(valor: Decimal) -> Result<Decimal, ApiError> {
    if valor <= Decimal::ZERO {
        return Err(ApiError::InvalidValorConsulta);
    }
    let mut valor = valor;
    valor.rescale(2);
    Ok(valor)
}

async fn check_paciente(db: &DatabaseConnection, id: i32) -> Result<(), ApiError> {
    pacientes::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(ApiError::PacienteNotFound(id))?;
    Ok(())
}

async fn check_medico(db: &DatabaseConnection, id: i32) -> Result<medicos::Model, ApiError> {
    medicos::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(ApiError::MedicoNotFound(id))
}

pub(crate) async fn create(
    db: &DatabaseConnection,
    payload: AgendamentoCreate,
) -> Result<AgendamentoOut, ApiError> {
    check_paciente(db, payload.paciente_id).await?;
    let medico = check_medico(db, payload.medico_id).await?;
    let valor = check_valor(payload.valor_consulta)?;

    let agendamento = agendamentos::ActiveModel {
        especialidade: Set(payload.especialidade),
        data_primeira_consulta: Set(payload.data_primeira_consulta),
        data_proxima_consulta: Set(payload.data_proxima_consulta),
        valor_consulta: Set(valor),
        descricao: Set(payload.descricao),
        receituario: Set(payload.receituario),
        paciente_id: Set(payload.paciente_id),
        medico_id: Set(payload.medico_id),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(
        agendamento_id = agendamento.id,
        paciente_id = agendamento.paciente_id,
        "agendamento created"
    );
    Ok(AgendamentoOut::from_parts(agendamento, medico))
}

pub(crate) async fn get_by_id(db: &DatabaseConnection, id: i32) -> Result<AgendamentoOut, ApiError> {
    let (agendamento, medico) = agendamentos::Entity::find_by_id(id)
        .find_also_related(medicos::Entity)
        .one(db)
        .await?
        .ok_or(ApiError::NotFound("agendamento"))?;
    let medico_id = agendamento.medico_id;
    Ok(AgendamentoOut::from_parts(
        agendamento,
        medico.ok_or(ApiError::MedicoNotFound(medico_id))?,
    ))
}

pub(crate) async fn list(
    db: &DatabaseConnection,
    paginacao: Paginacao,
) -> Result<Vec<AgendamentoOut>, ApiError> {
    let rows = agendamentos::Entity::find()
        .find_also_related(medicos::Entity)
        .order_by_asc(agendamentos::Column::Id)
        .offset(paginacao.skip)
        .limit(paginacao.limit)
        .all(db)
        .await?;
    collect(rows)
}

/// Lista os agendamentos de um paciente. Paciente inexistente é 404, não
/// uma lista vazia.
pub(crate) async fn list_by_paciente(
    db: &DatabaseConnection,
    paciente_id: i32,
    paginacao: Paginacao,
) -> Result<Vec<AgendamentoOut>, ApiError> {
    check_paciente(db, paciente_id).await?;
    let rows = agendamentos::Entity::find()
        .filter(agendamentos::Column::PacienteId.eq(paciente_id))
        .find_also_related(medicos::Entity)
        .order_by_asc(agendamentos::Column::Id)
        .offset(paginacao.skip)
        .limit(paginacao.limit)
        .all(db)
        .await?;
    collect(rows)
}

fn collect(
    rows: Vec<(agendamentos::Model, Option<medicos::Model>)>,
) -> Result<Vec<AgendamentoOut>, ApiError> {
    rows.into_iter()
        .map(|(agendamento, medico)| {
            let medico_id = agendamento.medico_id;
            Ok(AgendamentoOut::from_parts(
                agendamento,
                medico.ok_or(ApiError::MedicoNotFound(medico_id))?,
            ))
        })
        .collect()
}

/// Atualização parcial. O paciente do agendamento nunca muda; trocar o
/// médico exige que o novo médico exista.
pub(crate) async fn update(
    db: &DatabaseConnection,
    id: i32,
    payload: AgendamentoUpdate,
) -> Result<AgendamentoOut, ApiError> {
    let agendamento = agendamentos::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(ApiError::NotFound("agendamento"))?;

    let medico = match payload.medico_id {
        Some(medico_id) => check_medico(db, medico_id).await?,
        None => check_medico(db, agendamento.medico_id).await?,
    };

    let mut ativo: agendamentos::ActiveModel = agendamento.into();
    if let Some(medico_id) = payload.medico_id {
        ativo.medico_id = Set(medico_id);
    }
    if let Some(especialidade) = payload.especialidade {
        ativo.especialidade = Set(especialidade);
    }
    if let Some(data) = payload.data_primeira_consulta {
        ativo.data_primeira_consulta = Set(data);
    }
    if let Some(data) = payload.data_proxima_consulta {
        ativo.data_proxima_consulta = Set(Some(data));
    }
    if let Some(valor) = payload.valor_consulta {
        ativo.valor_consulta = Set(check_valor(valor)?);
    }
    if let Some(descricao) = payload.descricao {
        ativo.descricao = Set(Some(descricao));
    }
    if let Some(receituario) = payload.receituario {
        ativo.receituario = Set(Some(receituario));
    }

    let agendamento = ativo.update(db).await?;
    Ok(AgendamentoOut::from_parts(agendamento, medico))
}

pub(crate) async fn delete(db: &DatabaseConnection, id: i32) -> Result<(), ApiError> {
    let agendamento = agendamentos::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(ApiError::NotFound("agendamento"))?;
    agendamentos::Entity::delete_by_id(agendamento.id)
        .exec(db)
        .await?;
    info!(agendamento_id = id, "agendamento deleted");
    Ok(())
}
