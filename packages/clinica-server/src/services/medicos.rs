//! Cadastro de médicos.

use clinica_core::{Paginacao, validation};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use tracing::info;

use crate::db::medicos;
use crate::error::{ApiError, reference_violation, unique_violation};
use crate::schemas::{MedicoCreate, MedicoUpdate};

pub(crate) async fn create(
    db: &DatabaseConnection,
    payload: MedicoCreate,
) -> Result<medicos::Model, ApiError> {
    let telefone = validation::validate_telefone(&payload.telefone)?;

    if medicos::Entity::find()
        .filter(medicos::Column::Nome.eq(payload.nome.as_str()))
        .one(db)
        .await?
        .is_some()
    {
        return Err(ApiError::MedicoNameTaken);
    }

    let medico = medicos::ActiveModel {
        nome: Set(payload.nome),
        especialidade: Set(payload.especialidade),
        telefone: Set(telefone),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|e| unique_violation(e, ApiError::MedicoNameTaken))?;

    info!(medico_id = medico.id, "medico created");
    Ok(medico)
}

pub(crate) async fn get_by_id(
    db: &DatabaseConnection,
    id: i32,
) -> Result<medicos::Model, ApiError> {
    medicos::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(ApiError::MedicoNotFound(id))
}

pub(crate) async fn list(
    db: &DatabaseConnection,
    paginacao: Paginacao,
) -> Result<Vec<medicos::Model>, ApiError> {
    let medicos = medicos::Entity::find()
        .order_by_asc(medicos::Column::Id)
        .offset(paginacao.skip)
        .limit(paginacao.limit)
        .all(db)
        .await?;
    Ok(medicos)
}

/// Atualização parcial: nome não muda, só especialidade e telefone.
pub(crate) async fn update(
    db: &DatabaseConnection,
    id: i32,
    payload: MedicoUpdate,
) -> Result<medicos::Model, ApiError> {
    let medico = get_by_id(db, id).await?;
    let mut ativo: medicos::ActiveModel = medico.into();

    if let Some(especialidade) = payload.especialidade {
        ativo.especialidade = Set(especialidade);
    }
    if let Some(telefone) = payload.telefone {
        ativo.telefone = Set(validation::validate_telefone(&telefone)?);
    }

    Ok(ativo.update(db).await?)
}

/// Remove o médico. Se ainda houver agendamentos ou usuários apontando
/// para ele, a chave estrangeira barra a remoção.
pub(crate) async fn delete(db: &DatabaseConnection, id: i32) -> Result<(), ApiError> {
    let medico = get_by_id(db, id).await?;
    medicos::Entity::delete_by_id(medico.id)
        .exec(db)
        .await
        .map_err(reference_violation)?;
    info!(medico_id = id, "medico deleted");
    Ok(())
}
