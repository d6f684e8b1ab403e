//! Deterministic mock market data.
//!
//! Every draw goes through one injected [`StdRng`], so a fixed seed plus a
//! fixed timeframe reproduces a series exactly.

use std::sync::LazyLock;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;

use crate::{Candle, InstrumentKind, Quote, SeriesProfile, Timeframe, Trend};

/// Prices never walk below this fraction of the base price.
pub const PRICE_FLOOR_PCT: f32 = 0.1;

const CYCLE_AMPLITUDE: f32 = 0.1;
const CYCLE_TURNS: f32 = 2.0; // two full sine periods across a series
const WALK_AMPLITUDE: f32 = 0.02;
const DRIFT: f32 = 0.001;
const WICK_AMPLITUDE: f32 = 0.02;

const FALLBACK_BASE_PRICE: f32 = 100.0;

struct CatalogEntry {
    base_price: f32,
    kind: InstrumentKind,
    name: &'static str,
}

impl CatalogEntry {
    const fn stock(base_price: f32, name: &'static str) -> Self {
        Self {
            base_price,
            kind: InstrumentKind::Stock,
            name,
        }
    }

    const fn index(base_price: f32, name: &'static str) -> Self {
        Self {
            base_price,
            kind: InstrumentKind::Index,
            name,
        }
    }
}

static CATALOG: LazyLock<FxHashMap<&'static str, CatalogEntry>> = LazyLock::new(|| {
    let mut catalog = FxHashMap::default();
    catalog.insert("AAPL", CatalogEntry::stock(175.43, "Apple Inc."));
    catalog.insert("GOOGL", CatalogEntry::stock(138.21, "Alphabet Inc."));
    catalog.insert("MSFT", CatalogEntry::stock(378.85, "Microsoft Corporation"));
    catalog.insert("AMZN", CatalogEntry::stock(144.98, "Amazon.com Inc."));
    catalog.insert("TSLA", CatalogEntry::stock(219.16, "Tesla Inc."));
    catalog.insert("NVDA", CatalogEntry::stock(481.86, "NVIDIA Corporation"));
    catalog.insert("META", CatalogEntry::stock(296.73, "Meta Platforms Inc."));
    catalog.insert("NFLX", CatalogEntry::stock(421.25, "Netflix Inc."));
    catalog.insert("ORCL", CatalogEntry::stock(98.43, "Oracle Corporation"));
    catalog.insert("CRM", CatalogEntry::stock(214.38, "Salesforce Inc."));
    catalog.insert("ASPI", CatalogEntry::index(10386.27, "All Share Price Index"));
    catalog.insert("S&P_SL20", CatalogEntry::index(3128.16, "S&P Sri Lanka 20 Index"));
    catalog.insert("SPL", CatalogEntry::index(45.80, "S&P Lanka Index"));
    catalog.insert("MILANKA", CatalogEntry::index(2847.93, "Milanka Price Index"));
    catalog.insert("CSE_SELECT", CatalogEntry::index(1256.78, "CSE Select Index"));
    catalog
});

/// Walk a synthetic price series: a sinusoidal market cycle, a uniform random
/// step, and a small upward drift, applied multiplicatively per point.
///
/// Timestamps are spaced `profile.interval_ms` apart, ending one interval
/// before `end_time_ms`. A zero-point profile yields an empty series.
pub fn walk_series(
    base_price: f32,
    profile: SeriesProfile,
    end_time_ms: u64,
    rng: &mut impl Rng,
) -> Vec<Candle> {
    let n = profile.points;
    let floor = base_price * PRICE_FLOOR_PCT;
    let mut price = base_price * 0.8;
    let mut series = Vec::with_capacity(n);

    for i in 0..n {
        let progress = i as f32 / n as f32;
        let cycle = (progress * std::f32::consts::PI * 2.0 * CYCLE_TURNS).sin() * CYCLE_AMPLITUDE;
        let step = (rng.random::<f32>() - 0.5) * WALK_AMPLITUDE;
        let drift = DRIFT * progress;
        price = (price * (1.0 + cycle + step + drift)).max(floor);

        let open = series.last().map_or(base_price, |prev: &Candle| prev.close);
        let close = price;
        let high = open.max(close) * (1.0 + rng.random::<f32>() * WICK_AMPLITUDE);
        let low = open.min(close) * (1.0 - rng.random::<f32>() * WICK_AMPLITUDE);
        let volume = rng.random_range(1_000_000.0..3_000_000.0);

        let time = end_time_ms.saturating_sub((n - i) as u64 * profile.interval_ms);
        series.push(Candle {
            time,
            open,
            high,
            low,
            close,
            volume,
        });
    }

    series
}

/// Mock feed over a fixed instrument catalog.
pub struct SyntheticFeed {
    rng: StdRng,
    latency: Option<Duration>,
}

impl SyntheticFeed {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            latency: None,
        }
    }

    pub fn from_os_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            latency: None,
        }
    }

    /// Artificial delay applied by [`SyntheticFeed::fetch_quote`].
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn base_price(symbol: &str) -> f32 {
        CATALOG
            .get(symbol)
            .map_or(FALLBACK_BASE_PRICE, |entry| entry.base_price)
    }

    /// Candle history for `symbol` over `timeframe`, ending at `end_time_ms`.
    pub fn history(&mut self, symbol: &str, timeframe: Timeframe, end_time_ms: u64) -> Vec<Candle> {
        walk_series(
            Self::base_price(symbol),
            timeframe.profile(),
            end_time_ms,
            &mut self.rng,
        )
    }

    /// Spot snapshot. Indexes move in tighter bands than single stocks.
    pub fn quote(&mut self, symbol: &str) -> Quote {
        let (base_price, kind, name) = match CATALOG.get(symbol) {
            Some(entry) => (entry.base_price, entry.kind, entry.name.to_string()),
            None => (
                FALLBACK_BASE_PRICE,
                InstrumentKind::Stock,
                format!("{symbol} Corporation"),
            ),
        };
        let rng = &mut self.rng;

        let spot_band = match kind {
            InstrumentKind::Index => 0.01,
            InstrumentKind::Stock => 0.02,
        };
        let price = base_price * (1.0 + (rng.random::<f32>() - 0.5) * spot_band);

        let change_pct = match kind {
            InstrumentKind::Index => (rng.random::<f32>() - 0.5) * 4.0,
            InstrumentKind::Stock => (rng.random::<f32>() - 0.5) * 8.0,
        };
        let volume = match kind {
            InstrumentKind::Index => rng.random_range(50_000_000.0..150_000_000.0),
            InstrumentKind::Stock => rng.random_range(10_000_000.0..60_000_000.0),
        };
        let volatility_pct = match kind {
            InstrumentKind::Index => rng.random_range(0.5..4.5),
            InstrumentKind::Stock => rng.random_range(1.0..9.0),
        };
        let market_cap = match kind {
            InstrumentKind::Index => price * rng.random_range(5_000_000_000.0..15_000_000_000.0),
            InstrumentKind::Stock => price * rng.random_range(1_000_000_000.0..6_000_000_000.0),
        };
        let beta = match kind {
            InstrumentKind::Index => rng.random_range(0.3..1.8),
            InstrumentKind::Stock => rng.random_range(0.5..2.5),
        };
        let pe_ratio = match kind {
            InstrumentKind::Index => rng.random_range(10.0..35.0),
            InstrumentKind::Stock => rng.random_range(5.0..35.0),
        };
        let dividend_yield = match kind {
            InstrumentKind::Index => rng.random_range(1.0..4.0),
            InstrumentKind::Stock => rng.random_range(0.0..5.0),
        };
        let high_52w = price * (1.1 + rng.random::<f32>() * 0.3);
        let low_52w = price * (0.9 - rng.random::<f32>() * 0.3);

        Quote {
            symbol: symbol.to_string(),
            name,
            kind,
            price,
            change_pct,
            volume,
            volatility_pct,
            market_cap,
            beta,
            pe_ratio,
            dividend_yield,
            high_52w,
            low_52w,
            trend: Trend::from_change_pct(change_pct),
        }
    }

    /// [`SyntheticFeed::quote`] behind the configured latency.
    pub async fn fetch_quote(&mut self, symbol: &str) -> Quote {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        self.quote(symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeframe::DAY_MS;

    const END_TIME: u64 = 1_760_000_000_000;

    fn month_series(seed: u64) -> Vec<Candle> {
        let mut feed = SyntheticFeed::from_seed(seed);
        feed.history("AAPL", Timeframe::Month1, END_TIME)
    }

    #[test]
    fn series_has_profile_length_and_ascending_times() {
        let series = month_series(7);
        assert_eq!(series.len(), 30);
        for pair in series.windows(2) {
            assert_eq!(pair[1].time - pair[0].time, DAY_MS);
            assert!(pair[1].time > pair[0].time);
        }
        assert_eq!(series.last().unwrap().time, END_TIME - DAY_MS);
    }

    #[test]
    fn prices_respect_floor() {
        let base = SyntheticFeed::base_price("AAPL");
        for seed in 0..20 {
            for candle in month_series(seed) {
                assert!(candle.close >= base * PRICE_FLOOR_PCT);
            }
        }
    }

    #[test]
    fn ohlc_bounds_hold() {
        for candle in month_series(11) {
            assert!(candle.high >= candle.open.max(candle.close));
            assert!(candle.low <= candle.open.min(candle.close));
            assert!(candle.low > 0.0);
            assert!(candle.volume >= 1_000_000.0);
        }
    }

    #[test]
    fn candles_chain_open_to_previous_close() {
        let series = month_series(3);
        assert_eq!(series[0].open, SyntheticFeed::base_price("AAPL"));
        for pair in series.windows(2) {
            assert_eq!(pair[1].open, pair[0].close);
        }
    }

    #[test]
    fn same_seed_reproduces_series() {
        assert_eq!(month_series(42), month_series(42));
    }

    #[test]
    fn different_seeds_diverge() {
        assert_ne!(month_series(1), month_series(2));
    }

    #[test]
    fn zero_points_yields_empty_series() {
        let profile = SeriesProfile {
            points: 0,
            interval_ms: DAY_MS,
        };
        let mut rng = StdRng::seed_from_u64(0);
        assert!(walk_series(100.0, profile, END_TIME, &mut rng).is_empty());
    }

    #[test]
    fn quote_ranges_follow_instrument_kind() {
        let mut feed = SyntheticFeed::from_seed(9);

        let index = feed.quote("ASPI");
        assert_eq!(index.kind, InstrumentKind::Index);
        assert!(index.change_pct.abs() <= 2.0);
        assert!(index.volume >= 50_000_000.0);

        let stock = feed.quote("TSLA");
        assert_eq!(stock.kind, InstrumentKind::Stock);
        assert!(stock.change_pct.abs() <= 4.0);
        assert!(stock.high_52w > stock.price);
        assert!(stock.low_52w < stock.price);
    }

    #[test]
    fn unknown_symbol_falls_back() {
        let mut feed = SyntheticFeed::from_seed(5);
        let quote = feed.quote("ZZZZ");
        assert_eq!(quote.kind, InstrumentKind::Stock);
        assert_eq!(quote.name, "ZZZZ Corporation");
        assert!((quote.price - FALLBACK_BASE_PRICE).abs() <= FALLBACK_BASE_PRICE * 0.011);
    }

    #[test]
    fn trend_bands() {
        assert_eq!(Trend::from_change_pct(2.4), Trend::Bullish);
        assert_eq!(Trend::from_change_pct(0.9), Trend::Neutral);
        assert_eq!(Trend::from_change_pct(-0.9), Trend::Neutral);
        assert_eq!(Trend::from_change_pct(-1.2), Trend::Bearish);
    }
}
