use crate::error::PriceFeedError;
use crate::source::PriceSource;
use chrono::{DateTime, Utc};
use core_types::TradeId;
use ledger::LedgerService;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::time::interval;

/// One trade's display-level valuation at the latest simulated tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeMark {
    pub trade_id: TradeId,
    pub symbol: String,
    pub current_price: Decimal,
    pub unrealized_pnl: Decimal,
    pub unrealized_pnl_percent: Decimal,
    pub updated_at: DateTime<Utc>,
}

/// The poller's own shared snapshot of current marks, keyed by trade id.
pub type PriceBoard = Arc<RwLock<HashMap<TradeId, TradeMark>>>;

/// The polling actor that refreshes display prices for active trades.
///
/// This component is designed to run in a concurrent background task. Each
/// cycle it reads the active trades through the ledger, advances the
/// simulated price per distinct symbol, and republishes the whole board.
/// It never writes ledger state; a failed cycle only delays the next
/// refresh.
pub struct PricePoller {
    ledger: Arc<LedgerService>,
    source: Mutex<Box<dyn PriceSource>>,
    board: PriceBoard,
    period: Duration,
}

impl PricePoller {
    pub fn new(ledger: Arc<LedgerService>, source: Box<dyn PriceSource>, period: Duration) -> Self {
        Self {
            ledger,
            source: Mutex::new(source),
            board: Arc::new(RwLock::new(HashMap::new())),
            period,
        }
    }

    /// A handle to the shared board, for read-side consumers.
    pub fn board(&self) -> PriceBoard {
        self.board.clone()
    }

    /// Runs one poll cycle and returns the number of trades marked.
    ///
    /// The board is replaced wholesale, so trades closed since the last
    /// cycle fall off it rather than lingering with stale prices.
    pub async fn run_cycle(&self) -> Result<usize, PriceFeedError> {
        let trades = self.ledger.list_active_trades().await?;

        let mut source = self.source.lock().await;
        let now = Utc::now();

        let mut symbol_prices: HashMap<String, Decimal> = HashMap::new();
        let mut fresh: HashMap<TradeId, TradeMark> = HashMap::with_capacity(trades.len());

        for trade in &trades {
            let price = *symbol_prices
                .entry(trade.symbol.clone())
                .or_insert_with(|| source.tick(&trade.symbol, trade.entry_price));

            let unrealized_pnl = trade.pnl_at(price);
            let cost_basis = trade.entry_price * trade.amount;
            let unrealized_pnl_percent = if cost_basis.is_zero() {
                Decimal::ZERO
            } else {
                unrealized_pnl / cost_basis * Decimal::from(100)
            };

            fresh.insert(
                trade.id.clone(),
                TradeMark {
                    trade_id: trade.id.clone(),
                    symbol: trade.symbol.clone(),
                    current_price: price,
                    unrealized_pnl,
                    unrealized_pnl_percent,
                    updated_at: now,
                },
            );
        }

        let marked = fresh.len();
        *self.board.write().await = fresh;
        Ok(marked)
    }

    pub async fn start(self) {
        tracing::info!(period = ?self.period, "starting price poll loop");
        let mut timer = interval(self.period);

        loop {
            timer.tick().await;

            match self.run_cycle().await {
                Ok(marked) => tracing::debug!(marked, "price board refreshed"),
                Err(e) => tracing::warn!(error = %e, "price poll cycle failed; will retry"),
            }
        }
    }
}
