use crate::error::StoreError;
use sqlx::migrate::Migrator;
use sqlx::PgPool;
use tracing::info;

static MIGRATOR: Migrator = sqlx::migrate!();

/// Bring the `meals` table to the current schema.
///
/// Safe against a table that already exists, including one created with a
/// naive `TIMESTAMP` column, which is converted in place.
pub async fn migrate(pool: &PgPool) -> Result<(), StoreError> {
    info!(known = MIGRATOR.iter().count(), "Applying meals schema migrations");
    MIGRATOR
        .run(pool)
        .await
        .map_err(|e| StoreError::from(sqlx::Error::from(e)))?;
    info!("Meals schema is current");
    Ok(())
}
