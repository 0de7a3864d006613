use std::sync::Arc;

use color_eyre::eyre::Result;
use dotenv::dotenv;
use psychbook_api::config::ApiConfig;
use psychbook_db::{PgStore, create_pool, schema::initialize_database};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;

    // Create database connection pool
    let db_pool = create_pool(&config.database_url, config.database_max_connections).await?;

    // Make sure the booking tables exist before serving requests
    initialize_database(&db_pool).await?;

    // Start API server
    let store = Arc::new(PgStore::new(db_pool));
    psychbook_api::start_server(config, store).await?;

    Ok(())
}
