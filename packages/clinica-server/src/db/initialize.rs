use sea_orm::{DbConn, DbErr};
use sea_orm_migration::{MigrationTrait, MigratorTrait};

use crate::db::migration::m00001_create_all_tables;

pub(crate) async fn migrate(db_cnn: &DbConn) -> Result<(), DbErr> {
    Migrator::up(db_cnn, None).await
}

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m00001_create_all_tables::Migration)]
    }
}
