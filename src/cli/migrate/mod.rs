//! Migrate command - applies or reverts the PostgreSQL schema

use clap::Args;
use tracing::info;

use crate::infrastructure::storage::{Migrator, PostgresMigrator};

/// Arguments for the migrate command
#[derive(Args, Clone, Default)]
pub struct MigrateArgs {
    /// Revert the most recent migration instead of applying pending ones
    #[arg(long, conflicts_with = "status")]
    pub revert: bool,

    /// Print the current schema version and exit
    #[arg(long)]
    pub status: bool,
}

pub async fn run(args: MigrateArgs) -> anyhow::Result<()> {
    let config = super::bootstrap()?;
    let pool = crate::connect_postgres(&config).await?;
    let migrator = PostgresMigrator::new(pool);

    if args.status {
        // Printed rather than logged so it can be scripted
        match migrator.version().await? {
            Some(version) => println!("{}", version),
            None => println!("none"),
        }
        return Ok(());
    }

    if args.revert {
        migrator.revert().await?;
    } else {
        migrator.run().await?;
    }

    info!(version = ?migrator.version().await?, "Schema is up to date");

    Ok(())
}
