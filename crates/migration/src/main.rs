use clap::{Parser, Subcommand};
use sea_orm::Database;
use sea_orm_migration::prelude::*;

#[derive(Debug, Parser)]
#[command(name = "migration", about = "Manage the budgeting schema")]
struct Cli {
    /// Store to migrate.
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./budgeting.db?mode=rwc"
    )]
    database_url: String,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Apply pending migrations (default).
    Up,
    /// Roll back the last `steps` migrations, or all of them.
    Down {
        #[arg(long)]
        steps: Option<u32>,
    },
    /// Drop every table and re-apply all migrations.
    Fresh,
    /// Print applied and pending migrations.
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();
    let db = Database::connect(&cli.database_url).await?;

    match cli.command.unwrap_or(Command::Up) {
        Command::Up => migration::Migrator::up(&db, None).await?,
        Command::Down { steps } => migration::Migrator::down(&db, steps).await?,
        Command::Fresh => migration::Migrator::fresh(&db).await?,
        Command::Status => migration::Migrator::status(&db).await?,
    }

    Ok(())
}
