use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// The abstract source of simulated market prices.
/// This trait is the seam that lets tests drive the poller with
/// deterministic prices instead of a random walk.
pub trait PriceSource: Send + Sync {
    /// Advances and returns the price for `symbol`. The first tick for a
    /// symbol is seeded from `reference` (the trade's entry price).
    fn tick(&mut self, symbol: &str, reference: Decimal) -> Decimal;
}

/// A per-symbol bounded random walk.
///
/// Each tick drifts the last price by a uniform factor within
/// ±`volatility_pct` percent. Prices never go non-positive: a step that
/// would cross zero keeps the previous price instead.
pub struct RandomWalkSource {
    volatility_pct: Decimal,
    last: HashMap<String, Decimal>,
    rng: StdRng,
}

impl RandomWalkSource {
    pub fn new(volatility_pct: Decimal) -> Self {
        Self {
            volatility_pct,
            last: HashMap::new(),
            rng: StdRng::from_entropy(),
        }
    }

    /// A walk with a fixed seed, for reproducible tests.
    pub fn seeded(volatility_pct: Decimal, seed: u64) -> Self {
        Self {
            volatility_pct,
            last: HashMap::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl PriceSource for RandomWalkSource {
    fn tick(&mut self, symbol: &str, reference: Decimal) -> Decimal {
        let last = *self
            .last
            .entry(symbol.to_string())
            .or_insert(reference);

        let factor: f64 = self.rng.gen_range(-1.0..=1.0);
        let drift = last * self.volatility_pct / Decimal::from(100)
            * Decimal::from_f64(factor).unwrap_or_default();

        let next = last + drift;
        let next = if next > Decimal::ZERO { next } else { last };

        self.last.insert(symbol.to_string(), next);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn first_tick_starts_from_the_reference_price() {
        let mut source = RandomWalkSource::seeded(dec!(2), 7);
        let price = source.tick("BTCUSDT", dec!(100));

        // One 2%-bounded step away from 100.
        assert!(price >= dec!(98) && price <= dec!(102));
    }

    #[test]
    fn prices_stay_positive_over_many_ticks() {
        let mut source = RandomWalkSource::seeded(dec!(5), 42);
        let mut price = source.tick("ETHUSDT", dec!(1));
        for _ in 0..1000 {
            price = source.tick("ETHUSDT", dec!(1));
            assert!(price > Decimal::ZERO);
        }
    }

    #[test]
    fn symbols_walk_independently() {
        let mut source = RandomWalkSource::seeded(dec!(2), 3);
        source.tick("BTCUSDT", dec!(100));
        let eth = source.tick("ETHUSDT", dec!(10));

        // The second symbol is seeded from its own reference, not from the
        // first symbol's walk.
        assert!(eth >= dec!(9.8) && eth <= dec!(10.2));
    }

    #[test]
    fn seeded_walks_are_reproducible() {
        let mut a = RandomWalkSource::seeded(dec!(2), 11);
        let mut b = RandomWalkSource::seeded(dec!(2), 11);
        for _ in 0..10 {
            assert_eq!(a.tick("BTCUSDT", dec!(100)), b.tick("BTCUSDT", dec!(100)));
        }
    }
}
