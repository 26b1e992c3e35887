pub(crate) mod agendamentos;
pub(crate) mod enderecos;
pub mod initialize;
mod migration;
pub(crate) mod medicos;
pub(crate) mod pacientes;
pub(crate) mod users;

/// Conexão em memória já migrada, para os testes de serviço.
#[cfg(test)]
pub(crate) async fn test_connection() -> sea_orm::DatabaseConnection {
    let db = sea_orm::Database::connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory sqlite");
    initialize::migrate(&db).await.expect("migration failed");
    db
}
