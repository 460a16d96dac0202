use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Creates a database connection
///
/// # Arguments
/// * `database_url` - Any URL sea-orm understands, e.g. `postgres://…` or `sqlite::memory:`
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url);
    options.sqlx_logging_level(log::LevelFilter::Debug);

    // Every pooled connection to an in-memory SQLite database sees its own empty database
    if database_url.contains(":memory:") {
        options.max_connections(1);
    }

    Database::connect(options).await
}
