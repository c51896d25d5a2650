use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::info;

#[derive(Clone)]
pub struct DatabaseService {
    pub(crate) database_connection: DatabaseConnection,
}

impl DatabaseService {
    /// Connects to a `postgres://` or `sqlite:` URL and runs pending migrations.
    pub async fn new(uri: &str) -> Result<Self, DbErr> {
        let mut options = ConnectOptions::new(uri.to_owned());
        options.sqlx_logging(false);
        if uri.starts_with("sqlite") {
            // an in-memory database lives and dies with its single connection
            options.max_connections(1).min_connections(1);
        }

        info!("Connecting to database...");
        let database_connection = Database::connect(options).await?;
        info!("Running migrations...");
        Migrator::up(&database_connection, None).await?;
        info!("Database ready.");

        Ok(Self { database_connection })
    }
}
