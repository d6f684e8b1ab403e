use feed::Candle;

/// Summary measures over one candle series.
///
/// A pure function of the series: recomputed wholesale on every regeneration,
/// never updated incrementally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStats {
    pub min_price: f32,
    pub max_price: f32,
    pub avg_volume: f32,
    pub total_return_pct: f32,
    pub volatility_pct: f32,
    pub start_price: f32,
    pub end_price: f32,
}

impl SeriesStats {
    /// `None` when the series is empty; there is nothing to measure.
    pub fn measure(candles: &[Candle]) -> Option<Self> {
        let first = candles.first()?;
        let last = candles.last()?;

        let mut min_price = f32::INFINITY;
        let mut max_price = f32::NEG_INFINITY;
        let mut volume_sum = 0.0;
        let mut sq_change_sum = 0.0;
        let mut prev_close: Option<f32> = None;

        for candle in candles {
            min_price = min_price.min(candle.close);
            max_price = max_price.max(candle.close);
            volume_sum += candle.volume;

            // The first period carries a zero change, and still counts toward
            // the divisor: population RMS over all periods.
            if let Some(prev) = prev_close {
                let change_pct = (candle.close - prev) / prev * 100.0;
                sq_change_sum += change_pct * change_pct;
            }
            prev_close = Some(candle.close);
        }

        let n = candles.len() as f32;

        Some(SeriesStats {
            min_price,
            max_price,
            avg_volume: volume_sum / n,
            total_return_pct: (last.close - first.close) / first.close * 100.0,
            volatility_pct: (sq_change_sum / n).sqrt(),
            start_price: first.close,
            end_price: last.close,
        })
    }

    pub fn is_gain(&self) -> bool {
        self.total_return_pct >= 0.0
    }
}
