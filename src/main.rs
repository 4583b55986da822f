use dotenvy::dotenv;
use restaurant_directory::{
    config,
    core::{LoadOutcome, RestaurantStore},
    errors::Result,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, non-fatal since env vars can be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Open the store
    let data_path = config::storage::get_data_path();
    let mut store = RestaurantStore::new(data_path);
    match store.load() {
        LoadOutcome::Missing => info!("Starting a new directory at {:?}", store.path()),
        LoadOutcome::Loaded { count } => info!("Loaded {} restaurants", count),
        LoadOutcome::Malformed { reason } => {
            warn!("Ignoring unreadable data file, starting empty: {}", reason);
        }
    }

    // 4. Seed from config.toml when the directory is empty
    let seed_config = config::restaurants::load_default_config()
        .inspect_err(|e| error!("Failed to load seed configuration: {}", e))?;
    store
        .seed(&seed_config.restaurants)
        .inspect_err(|e| error!("Failed to seed restaurants: {}", e))?;

    // 5. Summary
    let stats = store.statistics();
    info!(
        "Directory ready: {} restaurants ({} active, {} inactive, {} favorites)",
        stats.total, stats.active, stats.inactive, stats.favorites
    );
    for (category, count) in &stats.by_category {
        info!("  {}: {}", category, count);
    }

    Ok(())
}
