use sea_orm::entity::prelude::*;

/// Paciente da clínica. CPF e CNS são armazenados somente com dígitos;
/// o endereço (1:1) vive em `enderecos` e é criado e removido junto com
/// o paciente pelo serviço.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "pacientes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub nome_completo: String,
    pub data_nascimento: Date,
    pub nome_da_mae: String,
    #[sea_orm(unique)]
    pub cpf: String,
    pub cns: Option<String>,
    pub telefone: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::enderecos::Entity")]
    Endereco,
    #[sea_orm(has_many = "super::agendamentos::Entity")]
    Agendamentos,
}

impl Related<super::enderecos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Endereco.def()
    }
}

impl Related<super::agendamentos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Agendamentos.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
