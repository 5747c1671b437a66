use std::error::Error;
use std::sync::Arc;

use trolley_core::executable_utils::{initialize_executable, initialize_tracing, run_service};
use trolley_core::persister::CartPersister;

use trolley_cart::cart_model::Cart;
use trolley_cart::sqlite_cart_storage::SqliteCartStorage;
use trolley_cart::subscribers::default_cart_dispatcher;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    println!("Starting backend...");
    dotenvy::dotenv().ok();
    let config = initialize_executable()?;
    initialize_tracing(&config.service.log_level);

    let storage = Arc::new(SqliteCartStorage::new(&config.common.database_url).await?);
    storage.initialize_schema().await?;

    let persister = Arc::new(CartPersister::<Cart>::new(
        storage,
        default_cart_dispatcher(),
    ));

    run_service(config.service, persister).await
}
