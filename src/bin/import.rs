use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use authenbite::infrastructure::database::Database;
use authenbite::modules::import::ImportService;
use authenbite::modules::restaurant::infrastructure::RestaurantRepositoryImpl;
use authenbite::shared::Config;

/// Batch importer: `authenbite-import <restaurants.json>`.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let path = std::env::args()
        .nth(1)
        .context("Usage: authenbite-import <restaurants.json>")?;
    let payload =
        std::fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path))?;

    let config = Config::from_env()?;
    let db = Arc::new(Database::new(&config.database_url)?);
    let service = ImportService::new(Arc::new(RestaurantRepositoryImpl::new(db)));

    let report = service.import_json(&payload).await?;

    for failure in &report.failures {
        tracing::warn!(
            index = failure.index,
            title = %failure.title,
            "Not imported: {}",
            failure.reason
        );
    }
    tracing::info!(
        total = report.total,
        imported = report.imported,
        failed = report.failed,
        "Import finished"
    );

    if report.failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}
