use serde::{Deserialize, Serialize};

/// Which geometry the series renderer emits.
///
/// Modes are mutually exclusive per render; switching is a view concern and
/// never touches the underlying candles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    #[default]
    Area,
    Candlestick,
}

impl ChartKind {
    pub fn is_candlestick(self) -> bool {
        matches!(self, ChartKind::Candlestick)
    }
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartKind::Line => write!(f, "line"),
            ChartKind::Area => write!(f, "area"),
            ChartKind::Candlestick => write!(f, "candlestick"),
        }
    }
}
