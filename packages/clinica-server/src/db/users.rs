use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Usuário autenticável do sistema.
///
/// Invariante: `medico_id` é preenchido se e somente se o papel for
/// `medico`; `is_superuser` é verdadeiro se e somente se o papel for
/// `admin`. O serviço de usuários garante ambos na criação.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub email: String,
    pub hashed_password: String,
    pub nome_completo: String,
    pub role: UserRole,
    pub is_active: bool,
    pub is_superuser: bool,
    pub medico_id: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[sea_orm(string_value = "admin")]
    Admin,
    #[sea_orm(string_value = "secretaria")]
    Secretaria,
    #[sea_orm(string_value = "medico")]
    Medico,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::medicos::Entity",
        from = "Column::MedicoId",
        to = "super::medicos::Column::Id"
    )]
    Medico,
}

impl Related<super::medicos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Medico.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
