//! `db` command handlers.

use pizzadb_core::AppConfig;

/// # Errors
///
/// Returns an error if `DATABASE_URL` is unset or the database is unreachable.
pub(crate) async fn run_db_ping(config: &AppConfig) -> anyhow::Result<()> {
    let pool = pizzadb_db::connect_pool_from_config(config).await?;
    pizzadb_db::ping(&pool).await?;
    println!("database ok");
    Ok(())
}

/// # Errors
///
/// Returns an error if the connection fails or a migration cannot be applied.
pub(crate) async fn run_db_migrate(config: &AppConfig) -> anyhow::Result<()> {
    let pool = pizzadb_db::connect_pool_from_config(config).await?;
    let applied = pizzadb_db::run_migrations(&pool).await?;
    tracing::info!(applied, "migrations complete");
    println!("applied {applied} migration(s)");
    Ok(())
}
