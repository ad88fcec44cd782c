use analytics::PerformanceAggregator;
use axum::{
    routing::{get, post},
    Router,
};
use ledger::LedgerService;
use price_feed::PriceBoard;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer, ExposeHeaders},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
pub struct AppState {
    pub ledger: Arc<LedgerService>,
    pub aggregator: PerformanceAggregator,
    pub price_board: PriceBoard,
}

/// Builds the application router. Factored out of [`run_server`] so tests can
/// drive the routes directly with `tower::ServiceExt::oneshot`.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/trade/execute", post(handlers::execute_trade))
        .route("/api/trade/:id/close", post(handlers::close_trade))
        .route("/api/trades/active", get(handlers::get_active_trades))
        .route("/api/performance", get(handlers::get_performance))
        .route(
            "/api/signals",
            post(handlers::store_signals).get(handlers::get_signals),
        )
        .route("/api/strategy/config", post(handlers::store_strategy_config))
        .route("/api/strategy/:id/config", get(handlers::get_strategy_config))
        .route("/api/prices", get(handlers::get_prices))
        .with_state(state)
}

/// The main function to configure and run the web server.
pub async fn run_server(addr: SocketAddr, state: Arc<AppState>) -> anyhow::Result<()> {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any())
        .expose_headers(ExposeHeaders::any());

    let app = build_router(state)
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http());

    tracing::info!("Web server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
