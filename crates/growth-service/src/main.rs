use std::sync::Arc;

use anyhow::Result;
use growth_service::{GrowthService, ServiceConfig};
use pdca_learner::{InMemoryRecordStore, RecordRepository, SqliteRecordStore};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // stdout carries responses, so logs go to stderr
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    tracing::info!("Starting growth engine");

    let config = ServiceConfig::from_env()?;
    tracing::info!("  Available hours/week: {}", config.available_hours);
    tracing::info!("  Default budget: {}", config.default_budget);
    tracing::info!("  Default team size: {}", config.default_team_size);

    let repository: Arc<dyn RecordRepository> = match &config.database_url {
        Some(url) => {
            let store = SqliteRecordStore::connect(url).await?;
            tracing::info!("PDCA records stored in {}", url);
            Arc::new(store)
        }
        None => {
            tracing::warn!("GROWTH_DATABASE_URL not set, PDCA records are kept in memory");
            Arc::new(InMemoryRecordStore::new())
        }
    };

    let service = GrowthService::new(&config, repository);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    let mut handled = 0u64;

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let response = service.handle_line(&line).await;
        stdout.write_all(response.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
        handled += 1;
    }

    tracing::info!("Input closed after {} requests, shutting down", handled);
    Ok(())
}
