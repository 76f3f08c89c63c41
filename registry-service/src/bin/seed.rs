//! Loads sample programs and clients into the configured store.

use registry_service::config::RegistryConfig;
use registry_service::services::seed_sample_data;
use registry_service::startup::connect_store;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = RegistryConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    init_tracing("registry-seed", &config.log_level, None);

    let store = connect_store(&config)
        .await
        .map_err(|e| std::io::Error::other(format!("Store connection error: {}", e)))?;

    let report = seed_sample_data(store.as_ref()).await.map_err(|e| {
        tracing::error!("Seeding failed: {}", e);
        std::io::Error::other(format!("Seed error: {}", e))
    })?;

    tracing::info!(
        programs_inserted = report.programs_inserted,
        programs_existing = report.programs_existing,
        clients_inserted = report.clients_inserted,
        clients_existing = report.clients_existing,
        store = store.backend_name(),
        "Sample data seeded"
    );

    Ok(())
}
