use sea_orm_migration::schema;
use sea_orm_migration::sea_orm::DbErr;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub(crate) struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let medicos = Table::create()
            .table(Medicos::Table)
            .if_not_exists()
            .col(schema::pk_auto(Medicos::Id))
            .col(schema::string_uniq(Medicos::Nome))
            .col(schema::string(Medicos::Especialidade))
            .col(schema::string(Medicos::Telefone))
            .to_owned();

        let pacientes = Table::create()
            .table(Pacientes::Table)
            .if_not_exists()
            .col(schema::pk_auto(Pacientes::Id))
            .col(schema::string(Pacientes::NomeCompleto))
            .col(schema::date(Pacientes::DataNascimento))
            .col(schema::string(Pacientes::NomeDaMae))
            .col(schema::string_uniq(Pacientes::Cpf))
            .col(schema::string_null(Pacientes::Cns))
            .col(schema::string(Pacientes::Telefone))
            .to_owned();

        // Um endereço por paciente; a remoção é feita pelo serviço dentro
        // da mesma transação, sem ON DELETE CASCADE.
        let enderecos = Table::create()
            .table(Enderecos::Table)
            .if_not_exists()
            .col(schema::pk_auto(Enderecos::Id))
            .col(schema::string(Enderecos::Rua))
            .col(schema::string_null(Enderecos::Numero))
            .col(schema::string(Enderecos::Bairro))
            .col(schema::string(Enderecos::Cidade))
            .col(schema::string_len(Enderecos::Estado, 2))
            .col(schema::string_len(Enderecos::Cep, 9))
            .col(
                ColumnDef::new(Enderecos::PacienteId)
                    .integer()
                    .not_null()
                    .unique_key(),
            )
            .foreign_key(
                ForeignKey::create()
                    .name("fk-enderecos-paciente-id")
                    .from(Enderecos::Table, Enderecos::PacienteId)
                    .to(Pacientes::Table, Pacientes::Id),
            )
            .to_owned();

        let users = Table::create()
            .table(Users::Table)
            .if_not_exists()
            .col(schema::pk_auto(Users::Id))
            .col(schema::string_uniq(Users::Email))
            .col(schema::string(Users::HashedPassword))
            .col(schema::string(Users::NomeCompleto))
            .col(schema::string_len(Users::Role, 16))
            .col(schema::boolean(Users::IsActive).default(true))
            .col(schema::boolean(Users::IsSuperuser).default(false))
            .col(schema::integer_null(Users::MedicoId))
            .foreign_key(
                ForeignKey::create()
                    .name("fk-users-medico-id")
                    .from(Users::Table, Users::MedicoId)
                    .to(Medicos::Table, Medicos::Id),
            )
            .to_owned();

        let agendamentos = Table::create()
            .table(Agendamentos::Table)
            .if_not_exists()
            .col(schema::pk_auto(Agendamentos::Id))
            .col(schema::string(Agendamentos::Especialidade))
            .col(schema::date(Agendamentos::DataPrimeiraConsulta))
            .col(schema::date_null(Agendamentos::DataProximaConsulta))
            .col(schema::decimal_len(Agendamentos::ValorConsulta, 10, 2))
            .col(schema::string_null(Agendamentos::Descricao))
            .col(schema::string_null(Agendamentos::Receituario))
            .col(schema::integer(Agendamentos::PacienteId))
            .col(schema::integer(Agendamentos::MedicoId))
            .foreign_key(
                ForeignKey::create()
                    .name("fk-agendamentos-paciente-id")
                    .from(Agendamentos::Table, Agendamentos::PacienteId)
                    .to(Pacientes::Table, Pacientes::Id),
            )
            .foreign_key(
                ForeignKey::create()
                    .name("fk-agendamentos-medico-id")
                    .from(Agendamentos::Table, Agendamentos::MedicoId)
                    .to(Medicos::Table, Medicos::Id),
            )
            .to_owned();

        manager.create_table(medicos).await?;
        manager.create_table(pacientes).await?;
        manager.create_table(enderecos).await?;
        manager.create_table(users).await?;
        manager.create_table(agendamentos).await?;

        // Índices únicos para colunas opcionais: NULLs não colidem entre si.
        manager
            .create_index(
                Index::create()
                    .name("idx-pacientes-cns")
                    .table(Pacientes::Table)
                    .col(Pacientes::Cns)
                    .unique()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx-users-medico-id")
                    .table(Users::Table)
                    .col(Users::MedicoId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Agendamentos::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Enderecos::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Pacientes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Medicos::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Medicos {
    Table,
    Id,
    Nome,
    Especialidade,
    Telefone,
}

#[derive(DeriveIden)]
enum Pacientes {
    Table,
    Id,
    NomeCompleto,
    DataNascimento,
    NomeDaMae,
    Cpf,
    Cns,
    Telefone,
}

#[derive(DeriveIden)]
enum Enderecos {
    Table,
    Id,
    Rua,
    Numero,
    Bairro,
    Cidade,
    Estado,
    Cep,
    PacienteId,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Email,
    HashedPassword,
    NomeCompleto,
    Role,
    IsActive,
    IsSuperuser,
    MedicoId,
}

#[derive(DeriveIden)]
enum Agendamentos {
    Table,
    Id,
    Especialidade,
    DataPrimeiraConsulta,
    DataProximaConsulta,
    ValorConsulta,
    Descricao,
    Receituario,
    PacienteId,
    MedicoId,
}
