use sea_orm::entity::prelude::*;

/// Agendamento de consulta. `valor_consulta` usa `Decimal` com escala 2;
/// paciente e médico devem existir antes da criação.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "agendamentos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub especialidade: String,
    pub data_primeira_consulta: Date,
    pub data_proxima_consulta: Option<Date>,
    pub valor_consulta: Decimal,
    pub descricao: Option<String>,
    pub receituario: Option<String>,
    pub paciente_id: i32,
    pub medico_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::pacientes::Entity",
        from = "Column::PacienteId",
        to = "super::pacientes::Column::Id"
    )]
    Paciente,
    #[sea_orm(
        belongs_to = "super::medicos::Entity",
        from = "Column::MedicoId",
        to = "super::medicos::Column::Id"
    )]
    Medico,
}

impl Related<super::pacientes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Paciente.def()
    }
}

impl Related<super::medicos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Medico.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
