//! SQLite pool construction and startup schema verification

use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tracing::info;

use crate::Result;
use crate::config::DatabaseConfig;
use crate::error::HiloError;

/// Tables and columns the service expects to find at startup.
///
/// The schema is declared here instead of reflected from the live database;
/// any missing table or column fails initialization.
const DECLARED_SCHEMA: &[(&str, &[&str])] = &[
    (
        "observations",
        &["station_id", "date", "precipitation", "temperature"],
    ),
    (
        "stations",
        &["station_id", "name", "latitude", "longitude", "elevation"],
    ),
];

/// Open a connection pool against the configured database URL.
pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await?;

    info!("Connected to observations database at {}", config.url);
    Ok(pool)
}

/// Compare the live database layout against [`DECLARED_SCHEMA`].
pub async fn verify_schema(pool: &SqlitePool) -> Result<()> {
    for (table, columns) in DECLARED_SCHEMA.iter().copied() {
        let found: Vec<String> = sqlx::query_scalar("SELECT name FROM pragma_table_info(?)")
            .bind(table)
            .fetch_all(pool)
            .await?;

        if found.is_empty() {
            return Err(HiloError::schema_mismatch(format!("missing table '{table}'")));
        }

        for column in columns {
            if !found.iter().any(|name| name == column) {
                return Err(HiloError::schema_mismatch(format!(
                    "table '{table}' is missing column '{column}'"
                )));
            }
        }
    }

    info!("Database layout matches the declared schema");
    Ok(())
}
