use migration::{Migrator, MigratorTrait};

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "budgeting={level},server={level},engine={level},migration={level}",
            level = settings.app.level
        ))
        .init();

    let db = connect(&settings.database).await?;
    let engine = engine::Engine::builder().database(db).build();

    server::run(engine, &settings.server.addr()).await?;

    Ok(())
}

/// Opens the store and brings its schema up to date.
async fn connect(
    config: &settings::Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let database = sea_orm::Database::connect(config.url()).await?;
    Migrator::up(&database, None).await?;
    tracing::info!(url = %config.url(), "database ready");
    Ok(database)
}
