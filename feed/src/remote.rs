//! Remote quote relay against the public Yahoo-style chart endpoint.
//!
//! One JSON fetch per call, mapped into the same [`Quote`]/[`Candle`] records
//! the synthetic feed produces. Persistence of the fetched rows is out of
//! scope here; callers decide what to do with them.

use std::sync::LazyLock;

use serde::Deserialize;

use crate::{Candle, FeedError, InstrumentKind, Quote, Timeframe, Trend};

const API_DOMAIN: &str = "https://query1.finance.yahoo.com";
const USER_AGENT: &str = "Mozilla/5.0";

static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(reqwest::Client::new);

#[derive(Deserialize)]
struct ChartResponse {
    chart: ChartNode,
}

#[derive(Deserialize)]
struct ChartNode {
    result: Option<Vec<ChartResult>>,
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct ApiError {
    code: String,
    description: String,
}

#[derive(Deserialize)]
struct ChartResult {
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<u64>,
    indicators: Indicators,
}

#[derive(Deserialize)]
struct ChartMeta {
    symbol: String,
    #[serde(rename = "regularMarketPrice", default)]
    regular_market_price: f32,
    #[serde(rename = "chartPreviousClose", default)]
    chart_previous_close: f32,
    #[serde(rename = "fiftyTwoWeekHigh", default)]
    fifty_two_week_high: f32,
    #[serde(rename = "fiftyTwoWeekLow", default)]
    fifty_two_week_low: f32,
}

#[derive(Deserialize)]
struct Indicators {
    quote: Vec<QuoteColumns>,
}

/// Column-major OHLCV arrays; the API nulls out rows it has no data for.
#[derive(Deserialize, Default)]
#[serde(default)]
struct QuoteColumns {
    open: Vec<Option<f32>>,
    high: Vec<Option<f32>>,
    low: Vec<Option<f32>>,
    close: Vec<Option<f32>>,
    volume: Vec<Option<f32>>,
}

/// `interval`/`range` query parameters understood by the chart endpoint.
fn query_params(timeframe: Timeframe) -> (&'static str, &'static str) {
    match timeframe {
        Timeframe::Min5 => ("5m", "1d"),
        Timeframe::Min15 => ("15m", "5d"),
        Timeframe::Min30 => ("30m", "5d"),
        Timeframe::Hour1 => ("60m", "5d"),
        Timeframe::Hour4 => ("60m", "1mo"),
        Timeframe::Week1 => ("1d", "5d"),
        Timeframe::Month1 => ("1d", "1mo"),
        Timeframe::Month3 => ("1d", "3mo"),
        Timeframe::Month6 => ("1d", "6mo"),
        Timeframe::Year1 => ("1d", "1y"),
        Timeframe::Year2 => ("1d", "2y"),
        Timeframe::Year5 => ("1d", "5y"),
    }
}

/// Fetch the live quote and candle history for `symbol`.
pub async fn fetch_history(
    symbol: &str,
    timeframe: Timeframe,
) -> Result<(Quote, Vec<Candle>), FeedError> {
    if symbol.is_empty() {
        return Err(FeedError::InvalidRequest("empty symbol".to_string()));
    }

    let (interval, range) = query_params(timeframe);
    let url = format!("{API_DOMAIN}/v8/finance/chart/{symbol}?interval={interval}&range={range}");

    let response = HTTP_CLIENT
        .get(&url)
        .header(reqwest::header::USER_AGENT, USER_AGENT)
        .send()
        .await
        .map_err(|e| FeedError::Fetch(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FeedError::Fetch(format!("HTTP {status} for {symbol}")));
    }

    let body: ChartResponse = response
        .json()
        .await
        .map_err(|e| FeedError::Parse(e.to_string()))?;

    if let Some(err) = body.chart.error {
        return Err(FeedError::Fetch(format!("{}: {}", err.code, err.description)));
    }

    let result = body
        .chart
        .result
        .into_iter()
        .flatten()
        .next()
        .ok_or_else(|| FeedError::Parse(format!("no chart data for {symbol}")))?;

    let candles = collect_candles(&result);
    if candles.len() < result.timestamp.len() {
        log::debug!(
            "{symbol}: dropped {} incomplete rows",
            result.timestamp.len() - candles.len()
        );
    }

    Ok((quote_from_meta(&result.meta, &candles), candles))
}

fn collect_candles(result: &ChartResult) -> Vec<Candle> {
    let Some(columns) = result.indicators.quote.first() else {
        return Vec::new();
    };

    result
        .timestamp
        .iter()
        .enumerate()
        .filter_map(|(i, &ts_secs)| {
            let row = |column: &Vec<Option<f32>>| column.get(i).copied().flatten();
            Some(Candle {
                time: ts_secs * 1_000,
                open: row(&columns.open)?,
                high: row(&columns.high)?,
                low: row(&columns.low)?,
                close: row(&columns.close)?,
                volume: row(&columns.volume).unwrap_or(0.0),
            })
        })
        .collect()
}

fn quote_from_meta(meta: &ChartMeta, candles: &[Candle]) -> Quote {
    let price = meta.regular_market_price;
    let change_pct = if meta.chart_previous_close > 0.0 {
        (price - meta.chart_previous_close) / meta.chart_previous_close * 100.0
    } else {
        0.0
    };

    // Fundamentals are not part of the chart payload; they stay zeroed.
    Quote {
        symbol: meta.symbol.clone(),
        name: meta.symbol.clone(),
        kind: InstrumentKind::Stock,
        price,
        change_pct,
        volume: candles.last().map_or(0.0, |c| c.volume),
        volatility_pct: 0.0,
        market_cap: 0.0,
        beta: 0.0,
        pe_ratio: 0.0,
        dividend_yield: 0.0,
        high_52w: meta.fifty_two_week_high,
        low_52w: meta.fifty_two_week_low,
        trend: Trend::from_change_pct(change_pct),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> ChartResponse {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn parses_chart_payload_and_skips_null_rows() {
        let body = parse(
            r#"{"chart":{"result":[{
                "meta":{"symbol":"AAPL","regularMarketPrice":176.5,
                        "chartPreviousClose":172.0,
                        "fiftyTwoWeekHigh":199.6,"fiftyTwoWeekLow":141.3},
                "timestamp":[1700000000,1700086400,1700172800],
                "indicators":{"quote":[{
                    "open":[171.0,null,174.0],
                    "high":[173.0,null,177.0],
                    "low":[170.0,null,173.5],
                    "close":[172.5,null,176.5],
                    "volume":[1000000.0,null,1200000.0]
                }]}
            }],"error":null}}"#,
        );

        let result = body.chart.result.unwrap().remove(0);
        let candles = collect_candles(&result);
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[0].time, 1_700_000_000_000);
        assert_eq!(candles[1].close, 176.5);

        let quote = quote_from_meta(&result.meta, &candles);
        assert_eq!(quote.symbol, "AAPL");
        assert!((quote.change_pct - (176.5 - 172.0) / 172.0 * 100.0).abs() < 1e-4);
        assert_eq!(quote.trend, Trend::Bullish);
        assert_eq!(quote.volume, 1_200_000.0);
    }

    #[test]
    fn api_error_node_is_detected() {
        let body = parse(
            r#"{"chart":{"result":null,
                "error":{"code":"Not Found","description":"No data found"}}}"#,
        );
        let err = body.chart.error.unwrap();
        assert_eq!(err.code, "Not Found");
    }

    #[test]
    fn every_timeframe_maps_to_query_params() {
        for tf in Timeframe::ALL {
            let (interval, range) = query_params(tf);
            assert!(!interval.is_empty());
            assert!(!range.is_empty());
        }
    }
}
