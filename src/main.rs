use analytics::PerformanceAggregator;
use clap::{Parser, Subcommand};
use configuration::Settings;
use ledger::{LedgerService, ReconcileWorker, RetryPolicy};
use price_feed::{PricePoller, RandomWalkSource};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use store::{KvStore, MemoryStore, PostgresStore};
use web_server::AppState;

/// The main entry point for the Meridian ledger service.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Parse command-line arguments
    let cli = Cli::parse();
    let settings = configuration::load_config()?;

    // Execute the appropriate command
    match cli.command {
        Commands::Serve(args) => handle_serve(args, settings).await,
        Commands::Reconcile => handle_reconcile(settings).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// The trade ledger and performance aggregation service.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API with its background reconcile and price-poll workers.
    Serve(ServeArgs),
    /// Run one index reconciliation sweep and exit.
    Reconcile,
}

#[derive(Parser)]
struct ServeArgs {
    /// Keep all state in memory instead of PostgreSQL (paper sessions, demos).
    #[arg(long)]
    memory_store: bool,
}

// ==============================================================================
// Command Logic
// ==============================================================================

/// Wires the store, the ledger, both background workers, and the HTTP server.
async fn handle_serve(args: ServeArgs, settings: Settings) -> anyhow::Result<()> {
    let store: Arc<dyn KvStore> = if args.memory_store {
        tracing::info!("using in-memory store; state will not survive a restart");
        Arc::new(MemoryStore::new())
    } else {
        build_postgres_store(&settings).await?
    };

    let ledger = Arc::new(LedgerService::new(store, retry_policy(&settings)));

    // The sweep is the safety net for index drift; it runs for the life of
    // the process.
    let worker = ReconcileWorker::new(
        ledger.clone(),
        Duration::from_secs(settings.reconciler.interval_secs),
    );
    tokio::spawn(worker.start());

    // The price poller only reads ledger state; its board feeds the
    // display-level /api/prices endpoint.
    let poller = PricePoller::new(
        ledger.clone(),
        Box::new(RandomWalkSource::new(settings.price_feed.volatility_pct)),
        Duration::from_secs(settings.price_feed.poll_interval_secs),
    );
    let price_board = poller.board();
    tokio::spawn(poller.start());

    let state = Arc::new(AppState {
        ledger,
        aggregator: PerformanceAggregator::new(),
        price_board,
    });

    let addr: SocketAddr = settings.server.bind_addr.parse()?;
    web_server::run_server(addr, state).await
}

/// One-shot maintenance: rebuild the indices from the records and report.
async fn handle_reconcile(settings: Settings) -> anyhow::Result<()> {
    let store = build_postgres_store(&settings).await?;
    let ledger = LedgerService::new(store, retry_policy(&settings));

    let report = ledger.reconcile_indices().await?;
    if report.is_clean() {
        tracing::info!(
            scanned = report.scanned,
            open = report.open,
            closed = report.closed,
            "indices consistent; nothing to repair"
        );
    } else {
        for finding in &report.findings {
            tracing::warn!(finding = %finding, "repaired");
        }
        tracing::info!(
            scanned = report.scanned,
            repaired = report.findings.len(),
            "indices rebuilt from records"
        );
    }

    Ok(())
}

async fn build_postgres_store(settings: &Settings) -> anyhow::Result<Arc<dyn KvStore>> {
    let pool = store::connect(
        settings.store.max_connections,
        Duration::from_secs(settings.store.acquire_timeout_secs),
    )
    .await?;
    store::run_migrations(&pool).await?;

    Ok(Arc::new(PostgresStore::new(
        pool,
        Duration::from_millis(settings.store.op_timeout_ms),
    )))
}

fn retry_policy(settings: &Settings) -> RetryPolicy {
    RetryPolicy {
        max_attempts: settings.store.max_retries,
        initial_backoff: Duration::from_millis(settings.store.retry_backoff_ms),
    }
}
