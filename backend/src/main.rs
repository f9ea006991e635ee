use std::sync::Arc;
use backend::{
    build_rocket,
    config::{Config, StoreBackend},
    processor::PollProcessor,
    queries::PgPollStore,
    routes::AppState,
    store::{MemoryStore, PollStore},
};
use shuttle_runtime::CustomError;
use sqlx::PgPool;
use tracing::{info, warn};

#[shuttle_runtime::main]
async fn rocket(
    #[shuttle_shared_db::Postgres] pool: PgPool,
    #[shuttle_runtime::Secrets] secret_store: shuttle_runtime::SecretStore,
) -> shuttle_rocket::ShuttleRocket {
    info!("🚀 Starting poll server");

    let config = Config::from_lookup(|key| secret_store.get(key)).map_err(CustomError::new)?;

    let store: Arc<dyn PollStore> = match config.store {
        StoreBackend::Postgres => {
            let store = PgPollStore::new(pool);
            store.migrate().await.map_err(CustomError::new)?;
            info!("📋 Migrations complete");
            Arc::new(store)
        }
        StoreBackend::Memory => {
            warn!("Using the in-memory poll store - polls are lost on restart");
            pool.close().await;
            Arc::new(MemoryStore::new())
        }
    };

    let state = AppState::new(PollProcessor::new(store), config);
    Ok(build_rocket(state).into())
}
