use std::time::Duration;

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait,
    Schema,
};
use tracing::info;

use crate::entity::{blog, note, person};

/// Open the shared connection pool.
///
/// The pool connects lazily, so an unreachable database does not stop the
/// process from starting; the first query reports the failure instead.
pub async fn init_db(db_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(db_url.to_owned());

    opt.max_connections(20)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .connect_lazy(true)
        .sqlx_logging(false);

    Database::connect(opt).await
}

/// Create every resource table that does not exist yet.
pub async fn create_tables<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    create_table(db, blog::Entity).await?;
    create_table(db, note::Entity).await?;
    create_table(db, person::Entity).await?;
    Ok(())
}

async fn create_table<C, E>(db: &C, entity: E) -> Result<(), DbErr>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let backend = db.get_database_backend();
    let mut stmt = Schema::new(backend).create_table_from_entity(entity);
    stmt.if_not_exists();
    db.execute_raw(backend.build(&stmt)).await?;
    info!(table = entity.table_name(), "Table ready");
    Ok(())
}
