use migration::{MigrationStatus, Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::info;

#[derive(Clone)]
pub struct MariaDbService {
    pub(crate) database_connection: DatabaseConnection,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationState {
    pub name: String,
    pub applied: bool,
}

impl MariaDbService {
    /// Connects, applies pending migrations and seeds the core publishers.
    pub async fn new(uri: &str) -> Result<Self, DbErr> {
        let service = Self::connect(uri).await?;
        service.migrate().await?;
        Ok(service)
    }

    /// Connects without touching the schema.
    pub async fn connect(uri: &str) -> Result<Self, DbErr> {
        info!("Connecting to MariaDB...");
        let mut opts = ConnectOptions::new(uri.to_owned());
        opts.sqlx_logging(false);
        let db = Database::connect(opts).await?;
        info!("Connected to MariaDB.");
        Ok(Self { database_connection: db })
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.database_connection
    }

    /// Applies every pending migration, then makes sure the core publishers exist.
    /// Safe to run repeatedly.
    pub async fn migrate(&self) -> Result<(), DbErr> {
        info!("Running migrations...");
        Migrator::up(&self.database_connection, None).await?;
        info!("Migrations finished.");
        self.ensure_publishers_exist().await
    }

    pub async fn pending_migrations(&self) -> Result<Vec<String>, DbErr> {
        Ok(Migrator::get_pending_migrations(&self.database_connection)
            .await?
            .iter()
            .map(|m| m.name().to_string())
            .collect())
    }

    pub async fn migration_status(&self) -> Result<Vec<MigrationState>, DbErr> {
        Ok(Migrator::get_migration_with_status(&self.database_connection)
            .await?
            .iter()
            .map(|m| MigrationState {
                name: m.name().to_string(),
                applied: matches!(m.status(), MigrationStatus::Applied),
            })
            .collect())
    }
}
