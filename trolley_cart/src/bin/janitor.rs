use std::error::Error;
use std::sync::Arc;

use trolley_core::executable_utils::{initialize_executable, initialize_tracing};
use trolley_core::janitor::CartJanitor;

use trolley_cart::sqlite_cart_storage::SqliteCartStorage;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    println!("Starting janitor...");
    dotenvy::dotenv().ok();
    let config = initialize_executable()?;
    initialize_tracing(&config.janitor.log_level);

    let storage = Arc::new(SqliteCartStorage::new(&config.common.database_url).await?);
    storage.initialize_schema().await?;

    let janitor = CartJanitor::new(storage, config.janitor);
    janitor.start().await
}
