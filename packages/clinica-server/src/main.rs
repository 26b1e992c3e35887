mod app;
mod auth;
mod config;
mod db;
mod error;
mod routes;
mod schemas;
mod services;
mod state;

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use sea_orm::{Database, DatabaseConnection};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::AppConfig;
use crate::db::users::UserRole;
use crate::schemas::UserCreate;
use crate::state::AppState;

#[derive(Parser)]
#[command(name = "clinica-server", about = "API de gerenciamento da clínica")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Sobe o servidor HTTP (padrão quando nenhum comando é dado)
    Serve,
    /// Aplica as migrações pendentes e sai
    Migrate,
    /// Cria um usuário administrador
    CreateAdmin {
        email: String,
        nome_completo: String,
        password: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;

    let db = Database::connect(&config.database_url)
        .await
        .with_context(|| format!("falha ao conectar em {}", config.database_url))?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(db, config).await,
        Command::Migrate => {
            db::initialize::migrate(&db).await?;
            info!("migrações aplicadas");
            Ok(())
        }
        Command::CreateAdmin {
            email,
            nome_completo,
            password,
        } => {
            db::initialize::migrate(&db).await?;
            create_admin(&db, email, nome_completo, password).await
        }
    }
}

async fn serve(db: DatabaseConnection, config: AppConfig) -> anyhow::Result<()> {
    db::initialize::migrate(&db).await?;

    let addr = config.listen_addr;
    let state = Arc::new(AppState { db, config });
    let app = app::axum_app(state);

    info!(%addr, "clinica-server started");
    let tcp_listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("falha ao escutar em {addr}"))?;
    axum::serve(tcp_listener, app).await?;
    Ok(())
}

async fn create_admin(
    db: &DatabaseConnection,
    email: String,
    nome_completo: String,
    password: String,
) -> anyhow::Result<()> {
    let user = services::users::create_user(
        db,
        UserCreate {
            email,
            nome_completo,
            password,
            role: UserRole::Admin,
            medico_id: None,
        },
    )
    .await
    .map_err(|e| anyhow::anyhow!("falha ao criar administrador: {e}"))?;

    println!("administrador criado: {} (id {})", user.email, user.id);
    Ok(())
}
