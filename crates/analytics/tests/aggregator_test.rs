//! Aggregator-over-ledger tests: the summary is a pure read of ledger state.

use analytics::PerformanceAggregator;
use core_types::{TradeIntent, TradeMode, TradeSide};
use ledger::{LedgerService, RetryPolicy};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use store::MemoryStore;

fn intent(price: Decimal) -> TradeIntent {
    TradeIntent {
        mode: TradeMode::Paper,
        exchange: "binance".into(),
        symbol: "BTCUSDT".into(),
        side: TradeSide::Buy,
        amount: dec!(2),
        price,
        strategy_id: "grid-bot".into(),
    }
}

#[tokio::test]
async fn summary_covers_only_closed_trades() {
    let ledger = LedgerService::new(Arc::new(MemoryStore::new()), RetryPolicy::default());
    let aggregator = PerformanceAggregator::new();

    let open = ledger.execute_trade(intent(dec!(100))).await.unwrap();
    let closing = ledger.execute_trade(intent(dec!(100))).await.unwrap();
    ledger.close_trade(&closing.id, dec!(110)).await.unwrap();

    let summary = aggregator.summarize(&ledger).await.unwrap();

    assert_eq!(summary.total_trades, 1);
    assert_eq!(summary.total_pnl, dec!(20));
    assert_eq!(summary.winning_trades, 1);
    assert_eq!(summary.win_rate_pct, dec!(100));

    // The open trade is untouched and still listed as active.
    let active = ledger.list_active_trades().await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, open.id);
}

#[tokio::test]
async fn empty_ledger_summarizes_to_zeros() {
    let ledger = LedgerService::new(Arc::new(MemoryStore::new()), RetryPolicy::default());
    let summary = PerformanceAggregator::new()
        .summarize(&ledger)
        .await
        .unwrap();

    assert_eq!(summary.total_trades, 0);
    assert_eq!(summary.total_pnl, Decimal::ZERO);
    assert_eq!(summary.win_rate_pct, Decimal::ZERO);
}
