//! Database initialization handler

use crate::cli::output::print_info;
use crate::cli::output::print_success;
use crate::database::PropertyStore;
use crate::AppConfig;
use crate::Result;

/// Handle `init-db`: create the database file and schema when missing
pub async fn handle_init_db(config: &AppConfig) -> Result<()> {
    print_info(&format!("🗄️  Initializing {}", config.database.url));

    let store = PropertyStore::create(&config.database).await?;
    store.init_schema().await?;

    let stats = store.stats().await?;
    print_success(&format!(
        "Schema ready ({} properties present)",
        stats.total_properties
    ));
    Ok(())
}
