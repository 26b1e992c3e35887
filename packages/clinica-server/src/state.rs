use sea_orm::DatabaseConnection;

use crate::config::AppConfig;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) db: DatabaseConnection,
    pub(crate) config: AppConfig,
}
