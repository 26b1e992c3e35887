//! Cadastro de pacientes e seus endereços.
//!
//! Paciente e endereço formam uma unidade: são criados na mesma transação
//! e removidos na mesma transação. Nenhuma operação deixa um paciente sem
//! endereço ou um endereço órfão.

use clinica_core::{Paginacao, validation};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, SqlErr, TransactionTrait,
};
use tracing::info;

use crate::db::{enderecos, pacientes};
use crate::error::{ApiError, reference_violation};
use crate::schemas::{EnderecoUpdate, PacienteCreate, PacienteOut, PacienteUpdate};

/// Distingue qual restrição de unicidade barrou a inserção quando uma
/// escrita concorrente passa pelas pré-checagens.
fn duplicate_document(err: DbErr) -> ApiError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) if msg.contains("cns") => {
            ApiError::CnsAlreadyRegistered
        }
        Some(SqlErr::UniqueConstraintViolation(_)) => ApiError::CpfAlreadyRegistered,
        _ => ApiError::Db(err),
    }
}

fn check_cidade(cidade: &str) -> Result<(), ApiError> {
    if (3..=72).contains(&cidade.chars().count()) {
        Ok(())
    } else {
        Err(ApiError::InvalidEndereco(
            "cidade deve ter entre 3 e 72 caracteres",
        ))
    }
}

pub(crate) async fn create(
    db: &DatabaseConnection,
    payload: PacienteCreate,
) -> Result<PacienteOut, ApiError> {
    let cpf = validation::validate_cpf(&payload.cpf)?;
    let cns = payload
        .cns
        .as_deref()
        .map(validation::validate_cns)
        .transpose()?;
    let telefone = validation::validate_telefone(&payload.telefone)?;
    validation::validate_cep(&payload.endereco.cep)?;
    let estado = validation::validate_estado(&payload.endereco.estado)?;
    check_cidade(&payload.endereco.cidade)?;

    if pacientes::Entity::find()
        .filter(pacientes::Column::Cpf.eq(cpf.as_str()))
        .one(db)
        .await?
        .is_some()
    {
        return Err(ApiError::CpfAlreadyRegistered);
    }
    if let Some(cns) = cns.as_deref() {
        if pacientes::Entity::find()
            .filter(pacientes::Column::Cns.eq(cns))
            .one(db)
            .await?
            .is_some()
        {
            return Err(ApiError::CnsAlreadyRegistered);
        }
    }

    let txn = db.begin().await?;

    let paciente = pacientes::ActiveModel {
        nome_completo: Set(payload.nome_completo),
        data_nascimento: Set(payload.data_nascimento),
        nome_da_mae: Set(payload.nome_da_mae),
        cpf: Set(cpf),
        cns: Set(cns),
        telefone: Set(telefone),
        ..Default::default()
    }
    .insert(&txn)
    .await
    .map_err(duplicate_document)?;

    let endereco = enderecos::ActiveModel {
        rua: Set(payload.endereco.rua),
        numero: Set(payload.endereco.numero),
        bairro: Set(payload.endereco.bairro),
        cidade: Set(payload.endereco.cidade),
        estado: Set(estado),
        cep: Set(payload.endereco.cep),
        paciente_id: Set(paciente.id),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    info!(paciente_id = paciente.id, "paciente created");
    Ok(PacienteOut::from_parts(paciente, Some(endereco)))
}

async fn find_with_endereco(
    db: &DatabaseConnection,
    paciente: pacientes::Model,
) -> Result<PacienteOut, ApiError> {
    let endereco = paciente.find_related(enderecos::Entity).one(db).await?;
    Ok(PacienteOut::from_parts(paciente, endereco))
}

pub(crate) async fn get_by_id(db: &DatabaseConnection, id: i32) -> Result<PacienteOut, ApiError> {
    let paciente = pacientes::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(ApiError::PacienteNotFound(id))?;
    find_with_endereco(db, paciente).await
}

/// Busca por CPF; o valor é normalizado antes da consulta, então formas
/// com ou sem pontuação encontram o mesmo registro.
pub(crate) async fn get_by_cpf(db: &DatabaseConnection, cpf: &str) -> Result<PacienteOut, ApiError> {
    let cpf = validation::only_digits(cpf);
    let paciente = pacientes::Entity::find()
        .filter(pacientes::Column::Cpf.eq(cpf.as_str()))
        .one(db)
        .await?
        .ok_or(ApiError::NotFound("paciente"))?;
    find_with_endereco(db, paciente).await
}

pub(crate) async fn get_by_cns(db: &DatabaseConnection, cns: &str) -> Result<PacienteOut, ApiError> {
    let cns = validation::only_digits(cns);
    let paciente = pacientes::Entity::find()
        .filter(pacientes::Column::Cns.eq(cns.as_str()))
        .one(db)
        .await?
        .ok_or(ApiError::NotFound("paciente"))?;
    find_with_endereco(db, paciente).await
}

pub(crate) async fn list(
    db: &DatabaseConnection,
    paginacao: Paginacao,
) -> Result<Vec<PacienteOut>, ApiError> {
    let rows = pacientes::Entity::find()
        .find_also_related(enderecos::Entity)
        .order_by_asc(pacientes::Column::Id)
        .offset(paginacao.skip)
        .limit(paginacao.limit)
        .all(db)
        .await?;
    Ok(rows
        .into_iter()
        .map(|(paciente, endereco)| PacienteOut::from_parts(paciente, endereco))
        .collect())
}

fn merge_endereco(
    endereco: enderecos::Model,
    update: EnderecoUpdate,
) -> Result<enderecos::ActiveModel, ApiError> {
    let mut ativo: enderecos::ActiveModel = endereco.into();
    if let Some(rua) = update.rua {
        ativo.rua = Set(rua);
    }
    if let Some(numero) = update.numero {
        ativo.numero = Set(Some(numero));
    }
    if let Some(bairro) = update.bairro {
        ativo.bairro = Set(bairro);
    }
    if let Some(cidade) = update.cidade {
        check_cidade(&cidade)?;
        ativo.cidade = Set(cidade);
    }
    if let Some(estado) = update.estado {
        ativo.estado = Set(validation::validate_estado(&estado)?);
    }
    if let Some(cep) = update.cep {
        validation::validate_cep(&cep)?;
        ativo.cep = Set(cep);
    }
    Ok(ativo)
}

/// Monta um endereço novo a partir de um sub-objeto de atualização, para o
/// caso excepcional de um paciente sem linha de endereço.
fn endereco_from_update(
    paciente_id: i32,
    update: EnderecoUpdate,
) -> Result<enderecos::ActiveModel, ApiError> {
    let (Some(rua), Some(bairro), Some(cidade), Some(estado), Some(cep)) =
        (update.rua, update.bairro, update.cidade, update.estado, update.cep)
    else {
        return Err(ApiError::InvalidEndereco(
            "paciente sem endereço cadastrado exige o endereço completo",
        ));
    };
    validation::validate_cep(&cep)?;
    let estado = validation::validate_estado(&estado)?;
    check_cidade(&cidade)?;
    Ok(enderecos::ActiveModel {
        rua: Set(rua),
        numero: Set(update.numero),
        bairro: Set(bairro),
        cidade: Set(cidade),
        estado: Set(estado),
        cep: Set(cep),
        paciente_id: Set(paciente_id),
        ..Default::default()
    })
}

/// Atualização parcial: só telefone e campos do endereço mudam depois do
/// cadastro. Documentos e dados civis são imutáveis.
pub(crate) async fn update(
    db: &DatabaseConnection,
    id: i32,
    payload: PacienteUpdate,
) -> Result<PacienteOut, ApiError> {
    let paciente = pacientes::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(ApiError::PacienteNotFound(id))?;
    let endereco = paciente.find_related(enderecos::Entity).one(db).await?;

    let txn = db.begin().await?;

    let paciente = match payload.telefone {
        Some(telefone) => {
            let mut ativo: pacientes::ActiveModel = paciente.into();
            ativo.telefone = Set(validation::validate_telefone(&telefone)?);
            ativo.update(&txn).await?
        }
        None => paciente,
    };

    let endereco = match (endereco, payload.endereco) {
        (Some(endereco), Some(update)) => {
            Some(merge_endereco(endereco, update)?.update(&txn).await?)
        }
        (None, Some(update)) => Some(endereco_from_update(paciente.id, update)?.insert(&txn).await?),
        (endereco, None) => endereco,
    };

    txn.commit().await?;
    Ok(PacienteOut::from_parts(paciente, endereco))
}

/// Remove o endereço e o paciente na mesma transação. Agendamentos
/// existentes barram a remoção pela chave estrangeira.
pub(crate) async fn delete(db: &DatabaseConnection, id: i32) -> Result<(), ApiError> {
    let paciente = pacientes::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(ApiError::PacienteNotFound(id))?;

    let txn = db.begin().await?;
    enderecos::Entity::delete_many()
        .filter(enderecos::Column::PacienteId.eq(paciente.id))
        .exec(&txn)
        .await?;
    pacientes::Entity::delete_by_id(paciente.id)
        .exec(&txn)
        .await
        .map_err(reference_violation)?;
    txn.commit().await?;

    info!(paciente_id = id, "paciente deleted");
    Ok(())
}
