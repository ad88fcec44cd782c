use crate::{error::AppError, AppState};
use analytics::PerformanceSummary;
use axum::{
    extract::{Path, State},
    Json,
};
use core_types::{TradeId, TradeIntent, TradeRecord};
use price_feed::TradeMark;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct CloseTradeRequest {
    pub exit_price: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct StoreSignalsRequest {
    pub signals: Value,
}

#[derive(Debug, Deserialize)]
pub struct StoreStrategyConfigRequest {
    pub strategy_id: String,
    #[serde(flatten)]
    pub config: Value,
}

/// # POST /api/trade/execute
pub async fn execute_trade(
    State(state): State<Arc<AppState>>,
    Json(intent): Json<TradeIntent>,
) -> Result<Json<TradeRecord>, AppError> {
    let record = state.ledger.execute_trade(intent).await?;
    Ok(Json(record))
}

/// # POST /api/trade/:id/close
pub async fn close_trade(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<CloseTradeRequest>,
) -> Result<Json<TradeRecord>, AppError> {
    let record = state
        .ledger
        .close_trade(&TradeId::from(id), request.exit_price)
        .await?;
    Ok(Json(record))
}

/// # GET /api/trades/active
/// Fetches all open trades, in execution order.
pub async fn get_active_trades(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TradeRecord>>, AppError> {
    let trades = state.ledger.list_active_trades().await?;
    Ok(Json(trades))
}

/// # GET /api/performance
/// Folds the closed-trade set into a summary on every request.
pub async fn get_performance(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PerformanceSummary>, AppError> {
    let summary = state.aggregator.summarize(&state.ledger).await?;
    Ok(Json(summary))
}

/// # POST /api/signals
pub async fn store_signals(
    State(state): State<Arc<AppState>>,
    Json(request): Json<StoreSignalsRequest>,
) -> Result<Json<Value>, AppError> {
    state.ledger.store_signals(request.signals).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

/// # GET /api/signals
pub async fn get_signals(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let signals = state.ledger.get_signals().await?;
    Ok(Json(signals))
}

/// # POST /api/strategy/config
/// Persists an opaque per-strategy configuration blob.
pub async fn store_strategy_config(
    State(state): State<Arc<AppState>>,
    Json(request): Json<StoreStrategyConfigRequest>,
) -> Result<Json<Value>, AppError> {
    state
        .ledger
        .store_strategy_config(&request.strategy_id, request.config)
        .await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

/// # GET /api/strategy/:id/config
/// Answers `null` for a strategy that was never configured.
pub async fn get_strategy_config(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Option<Value>>, AppError> {
    let config = state.ledger.get_strategy_config(&id).await?;
    Ok(Json(config))
}

/// # GET /api/prices
/// The price poller's current board: display-level marks for open trades,
/// at most one poll period stale.
pub async fn get_prices(State(state): State<Arc<AppState>>) -> Json<Vec<TradeMark>> {
    let board = state.price_board.read().await;
    let mut marks: Vec<TradeMark> = board.values().cloned().collect();
    marks.sort_by(|a, b| a.trade_id.as_str().cmp(b.trade_id.as_str()));
    Json(marks)
}
