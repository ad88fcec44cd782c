use crate::enums::{TradeMode, TradeSide, TradeStatus};
use crate::error::CoreError;
use crate::ids::TradeId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An already-decided request to open a trade, as it arrives at the ledger
/// boundary. Strategy signal generation happens upstream; by the time an
/// intent reaches us, everything is settled except validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeIntent {
    pub mode: TradeMode,
    pub exchange: String,
    pub symbol: String,
    pub side: TradeSide,
    pub amount: Decimal,
    pub price: Decimal,
    pub strategy_id: String,
}

impl TradeIntent {
    /// Rejects intents before any write happens.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.amount <= Decimal::ZERO {
            return Err(CoreError::InvalidInput(
                "amount".to_string(),
                format!("must be positive, got {}", self.amount),
            ));
        }
        if self.price <= Decimal::ZERO {
            return Err(CoreError::InvalidInput(
                "price".to_string(),
                format!("must be positive, got {}", self.price),
            ));
        }
        Ok(())
    }
}

/// The durable entity representing one open or closed position.
///
/// Invariant: `exit_price`, `closed_at`, `pnl`, and `pnl_percent` are all
/// present or all absent together, and all-present implies
/// `status == Closed`. Records are append-only: closing is a state
/// transition, never an erasure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub id: TradeId,
    pub mode: TradeMode,
    pub exchange: String,
    pub symbol: String,
    pub side: TradeSide,
    pub amount: Decimal,
    pub entry_price: Decimal,
    pub current_price: Decimal,
    pub strategy_id: String,
    pub status: TradeStatus,
    pub created_at: DateTime<Utc>,
    pub exit_price: Option<Decimal>,
    pub closed_at: Option<DateTime<Utc>>,
    pub pnl: Option<Decimal>,
    pub pnl_percent: Option<Decimal>,
}

impl TradeRecord {
    /// Creates a fresh open record from a validated intent.
    /// The entry price and the current price start out identical.
    pub fn open(intent: TradeIntent) -> Self {
        Self {
            id: TradeId::generate(),
            mode: intent.mode,
            exchange: intent.exchange,
            symbol: intent.symbol,
            side: intent.side,
            amount: intent.amount,
            entry_price: intent.price,
            current_price: intent.price,
            strategy_id: intent.strategy_id,
            status: TradeStatus::Open,
            created_at: Utc::now(),
            exit_price: None,
            closed_at: None,
            pnl: None,
            pnl_percent: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == TradeStatus::Open
    }

    /// Realized P&L for a hypothetical exit at `price`, using signed-side
    /// arithmetic: longs profit when price rises, shorts when it falls.
    pub fn pnl_at(&self, price: Decimal) -> Decimal {
        match self.side {
            TradeSide::Buy => (price - self.entry_price) * self.amount,
            TradeSide::Sell => (self.entry_price - price) * self.amount,
        }
    }

    /// Transitions the record to `Closed`, filling the whole closure group
    /// (exit price, timestamp, realized P&L) in one mutation.
    ///
    /// The caller is responsible for the already-closed guard; this method
    /// only performs the state transition itself.
    pub fn close(&mut self, exit_price: Decimal, closed_at: DateTime<Utc>) {
        let pnl = self.pnl_at(exit_price);
        let cost_basis = self.entry_price * self.amount;
        let pnl_percent = if cost_basis.is_zero() {
            Decimal::ZERO
        } else {
            pnl / cost_basis * Decimal::from(100)
        };

        self.status = TradeStatus::Closed;
        self.current_price = exit_price;
        self.exit_price = Some(exit_price);
        self.closed_at = Some(closed_at);
        self.pnl = Some(pnl);
        self.pnl_percent = Some(pnl_percent);
    }
}
