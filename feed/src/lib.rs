pub mod refresh;
pub mod remote;
pub mod synthetic;
mod timeframe;

pub use timeframe::{DAY_MS, HOUR_MS, MINUTE_MS, SeriesProfile, Timeframe};

use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, Clone)]
pub enum FeedError {
    #[error("Fetch error: {0}")]
    Fetch(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// One aggregated price bucket. Timestamps are unix milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub struct Candle {
    pub time: u64,
    pub open: f32,
    pub high: f32,
    pub low: f32,
    pub close: f32,
    pub volume: f32,
}

impl Candle {
    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum InstrumentKind {
    Stock,
    Index,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Trend {
    Bullish,
    Neutral,
    Bearish,
}

impl Trend {
    /// Bullish above +1% daily change, bearish below -1%.
    pub fn from_change_pct(change_pct: f32) -> Self {
        if change_pct > 1.0 {
            Trend::Bullish
        } else if change_pct < -1.0 {
            Trend::Bearish
        } else {
            Trend::Neutral
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trend::Bullish => write!(f, "bullish"),
            Trend::Neutral => write!(f, "neutral"),
            Trend::Bearish => write!(f, "bearish"),
        }
    }
}

/// Spot snapshot for a single instrument, as surfaced by any feed.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Quote {
    pub symbol: String,
    pub name: String,
    pub kind: InstrumentKind,
    pub price: f32,
    pub change_pct: f32,
    pub volume: f32,
    pub volatility_pct: f32,
    pub market_cap: f32,
    pub beta: f32,
    pub pe_ratio: f32,
    pub dividend_yield: f32,
    pub high_52w: f32,
    pub low_52w: f32,
    pub trend: Trend,
}

impl Quote {
    pub fn is_index(&self) -> bool {
        self.kind == InstrumentKind::Index
    }
}
