//! Database connection and initialization.

use std::collections::HashSet;
use std::time::Duration;

use common::DatabaseConfig;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database as SeaDatabase, DatabaseConnection, DbErr,
    EntityTrait, Statement,
};
use sea_orm_migration::{seaql_migrations, MigratorTrait};

use super::migrations::Migrator;

/// Database wrapper for connection management
#[derive(Clone)]
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    /// Initialize database connection and run migrations.
    ///
    /// Migrations only create what is missing, so this is safe on every startup.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DbErr> {
        let db = Self::connect_without_migrations(config).await?;

        // Run pending migrations
        Migrator::up(&db.connection, None).await?;
        tracing::info!("Database connected and migrations applied");

        Ok(db)
    }

    /// Connect without running migrations (for CLI commands).
    pub async fn connect_without_migrations(config: &DatabaseConfig) -> Result<Self, DbErr> {
        let mut options = ConnectOptions::new(config.url.clone());
        options
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .sqlx_logging(false);
        if let Some(secs) = config.idle_timeout_secs {
            options.idle_timeout(Duration::from_secs(secs));
        }

        let connection = SeaDatabase::connect(options).await?;
        Ok(Self { connection })
    }

    /// Get a clone of the database connection.
    pub fn get_connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    /// Run pending migrations.
    pub async fn run_migrations(&self) -> Result<(), DbErr> {
        Migrator::up(&self.connection, None).await
    }

    /// Rollback the last migration.
    pub async fn rollback_migration(&self) -> Result<(), DbErr> {
        Migrator::down(&self.connection, Some(1)).await
    }

    /// Every known migration paired with whether it has been applied.
    pub async fn migration_status(&self) -> Result<Vec<(String, bool)>, DbErr> {
        let applied: HashSet<String> = seaql_migrations::Entity::find()
            .all(&self.connection)
            .await?
            .into_iter()
            .map(|row| row.version)
            .collect();

        Ok(Migrator::migrations()
            .iter()
            .map(|migration| {
                let name = migration.name().to_string();
                let done = applied.contains(&name);
                (name, done)
            })
            .collect())
    }

    /// Reset database and run all migrations fresh.
    pub async fn fresh_migrations(&self) -> Result<(), DbErr> {
        Migrator::fresh(&self.connection).await
    }
}

/// `SELECT 1` against any connection.
pub(crate) async fn ping(connection: &DatabaseConnection) -> Result<(), DbErr> {
    connection
        .execute(Statement::from_string(
            connection.get_database_backend(),
            "SELECT 1".to_string(),
        ))
        .await?;
    Ok(())
}
