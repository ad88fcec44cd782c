use crate::summary::PerformanceSummary;
use core_types::TradeRecord;
use rust_decimal::Decimal;

/// A stateless calculator for deriving performance metrics from closed trades.
#[derive(Debug, Default)]
pub struct PerformanceEngine {}

impl PerformanceEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds a set of closed trade records into a summary.
    ///
    /// A record without a realized P&L contributes zero to the totals (it
    /// counts as a losing trade, the way a break-even trade does). With no
    /// records at all, every metric is zero — the win rate is defined as
    /// zero rather than NaN.
    pub fn summarize(&self, trades: &[TradeRecord]) -> PerformanceSummary {
        let mut summary = PerformanceSummary::new();

        if trades.is_empty() {
            return summary;
        }

        summary.total_trades = trades.len();

        for trade in trades {
            let pnl = trade.pnl.unwrap_or_default();
            summary.total_pnl += pnl;

            if pnl > Decimal::ZERO {
                summary.winning_trades += 1;
            } else {
                summary.losing_trades += 1;
            }
        }

        summary.win_rate_pct = Decimal::from(summary.winning_trades)
            / Decimal::from(summary.total_trades)
            * Decimal::from(100);

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use core_types::{TradeIntent, TradeMode, TradeSide};
    use rust_decimal_macros::dec;

    fn closed_trade(side: TradeSide, entry: Decimal, exit: Decimal, amount: Decimal) -> TradeRecord {
        let mut record = TradeRecord::open(TradeIntent {
            mode: TradeMode::Paper,
            exchange: "binance".into(),
            symbol: "BTCUSDT".into(),
            side,
            amount,
            price: entry,
            strategy_id: "grid-bot".into(),
        });
        record.close(exit, Utc::now());
        record
    }

    #[test]
    fn zero_trades_summarize_to_all_zeros() {
        let summary = PerformanceEngine::new().summarize(&[]);
        assert_eq!(summary, PerformanceSummary::new());
    }

    #[test]
    fn mixed_trades_fold_into_totals_and_win_rate() {
        let trades = vec![
            closed_trade(TradeSide::Buy, dec!(100), dec!(110), dec!(2)), // +20
            closed_trade(TradeSide::Buy, dec!(100), dec!(95), dec!(1)),  // -5
            closed_trade(TradeSide::Sell, dec!(100), dec!(90), dec!(2)), // +20
            closed_trade(TradeSide::Buy, dec!(50), dec!(40), dec!(1)),   // -10
        ];

        let summary = PerformanceEngine::new().summarize(&trades);

        assert_eq!(summary.total_pnl, dec!(25));
        assert_eq!(summary.total_trades, 4);
        assert_eq!(summary.winning_trades, 2);
        assert_eq!(summary.losing_trades, 2);
        assert_eq!(summary.win_rate_pct, dec!(50));
    }

    #[test]
    fn break_even_trades_do_not_count_as_wins() {
        let trades = vec![closed_trade(TradeSide::Buy, dec!(100), dec!(100), dec!(1))];
        let summary = PerformanceEngine::new().summarize(&trades);

        assert_eq!(summary.total_pnl, Decimal::ZERO);
        assert_eq!(summary.winning_trades, 0);
        assert_eq!(summary.losing_trades, 1);
        assert_eq!(summary.win_rate_pct, Decimal::ZERO);
    }

    #[test]
    fn all_winning_trades_reach_a_full_win_rate() {
        let trades = vec![
            closed_trade(TradeSide::Buy, dec!(10), dec!(12), dec!(1)),
            closed_trade(TradeSide::Buy, dec!(10), dec!(15), dec!(1)),
        ];
        let summary = PerformanceEngine::new().summarize(&trades);

        assert_eq!(summary.win_rate_pct, dec!(100));
        assert_eq!(summary.total_pnl, dec!(7));
    }
}
