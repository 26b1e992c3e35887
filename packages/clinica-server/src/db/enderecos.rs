use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "enderecos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub rua: String,
    pub numero: Option<String>,
    pub bairro: String,
    pub cidade: String,
    pub estado: String,
    pub cep: String,
    #[sea_orm(unique)]
    pub paciente_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::pacientes::Entity",
        from = "Column::PacienteId",
        to = "super::pacientes::Column::Id"
    )]
    Paciente,
}

impl Related<super::pacientes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Paciente.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
