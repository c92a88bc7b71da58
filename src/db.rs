use log::info;
use sea_orm::{ConnectionTrait, Database, DbConn, DbErr, Schema};

use crate::entities::prelude::*;

///
/// Connects to the database at `database_url` and makes sure
/// every table and index exists before handing the connection out.
///
pub async fn connect(database_url: &str) -> Result<DbConn, DbErr> {
    let db = Database::connect(database_url).await?;
    init_schema(&db).await?;
    info!("Database ready at {}", database_url);
    Ok(db)
}

///
/// Creates the `categories` and `transactions` tables and their indexes
/// from the entity definitions. Safe to run against an existing database.
///
pub async fn init_schema(db: &DbConn) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut category_stmt = schema.create_table_from_entity(Categories);
    category_stmt.if_not_exists();
    let mut tx_stmt = schema.create_table_from_entity(Transactions);
    tx_stmt.if_not_exists();

    db.execute(backend.build(&category_stmt)).await?;
    db.execute(backend.build(&tx_stmt)).await?;

    let index_stmts = schema.create_index_from_entity(Categories).into_iter()
        .chain(schema.create_index_from_entity(Transactions));
    for mut index_stmt in index_stmts {
        index_stmt.if_not_exists();
        db.execute(backend.build(&index_stmt)).await?;
    }

    Ok(())
}
