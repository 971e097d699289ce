mod db;
mod run;
mod vendors;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::vendors::VendorsCommands;

#[derive(Debug, Parser)]
#[command(name = "pizzadb-cli")]
#[command(about = "Pizza vendor catalog command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the catalog refresh pipeline once
    Run {
        /// Collect and reconcile into an in-memory store; the real store is not touched
        #[arg(long)]
        dry_run: bool,
        /// Reconcile into the Postgres database at DATABASE_URL instead of the REST store
        #[arg(long, conflicts_with = "dry_run")]
        postgres: bool,
    },
    /// Inspect stored vendors
    Vendors {
        #[command(subcommand)]
        command: VendorsCommands,
    },
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Check database connectivity
    Ping,
    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = pizzadb_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Run { dry_run, postgres }) => {
            let target = run::StoreTarget::from_flags(dry_run, postgres);
            run::run_pipeline(&config, target).await?;
        }
        Some(Commands::Vendors { command }) => vendors::run_vendors(&config, command).await?,
        Some(Commands::Db { command }) => match command {
            DbCommands::Ping => db::run_db_ping(&config).await?,
            DbCommands::Migrate => db::run_db_migrate(&config).await?,
        },
        None => println!("pizzadb-cli: no command given; try --help"),
    }

    Ok(())
}

#[cfg(test)]
mod tests;
