//! Series geometry: line/area paths, candlesticks, and the expert-mode
//! volume underlay.

use data::SeriesStats;
use data::config::theme::{Theme, scale_alpha};
use feed::Candle;

use super::scale::{ChartLayout, PriceScale};
use crate::frame::{Fill, Frame, LinearGradient, Point, Size};

const LINE_WIDTH: f32 = 2.5;
const WICK_WIDTH: f32 = 1.0;
const BODY_STROKE_WIDTH: f32 = 1.5;

/// Bodies shorter than this render as a flat doji line instead of a
/// zero-height rectangle.
pub const DOJI_THRESHOLD: f32 = 1.0;

const MIN_CANDLE_WIDTH: f32 = 3.0;
const MAX_CANDLE_WIDTH: f32 = 12.0;
const CANDLE_WIDTH_FACTOR: f32 = 0.8;

/// Marker cap: at most one dot per twentieth of the series.
const MAX_MARKERS: usize = 20;
const MARKER_RADIUS: f32 = 3.0;

const AREA_ALPHA_TOP: f32 = 0.3;
const AREA_ALPHA_BOTTOM: f32 = 0.05;

const VOLUME_BAND: f32 = 40.0;
const VOLUME_BAR_HALF_WIDTH: f32 = 3.0;

fn trend_color(stats: &SeriesStats, theme: &Theme) -> palette::Srgba {
    if stats.is_gain() {
        theme.bullish
    } else {
        theme.bearish
    }
}

/// Polyline through every close, optionally over a gradient-filled area.
pub fn draw_line(
    frame: &mut Frame,
    layout: &ChartLayout,
    scale: &PriceScale,
    candles: &[Candle],
    stats: &SeriesStats,
    theme: &Theme,
    fill_area: bool,
) {
    if candles.is_empty() {
        return;
    }
    let color = trend_color(stats, theme);

    let points: Vec<Point> = candles
        .iter()
        .enumerate()
        .map(|(i, candle)| Point::new(scale.x(i), scale.y(candle.close)))
        .collect();

    if fill_area {
        let mut area = Vec::with_capacity(points.len() + 2);
        area.push(Point::new(points[0].x, layout.bottom()));
        area.extend(points.iter().copied());
        area.push(Point::new(points[points.len() - 1].x, layout.bottom()));

        frame.fill_path(
            area,
            Fill::Gradient(LinearGradient {
                start: Point::new(0.0, layout.top()),
                end: Point::new(0.0, layout.bottom()),
                stops: [
                    (0.0, scale_alpha(color, AREA_ALPHA_TOP)),
                    (1.0, scale_alpha(color, AREA_ALPHA_BOTTOM)),
                ],
            }),
        );
    }

    frame.stroke_path(points.clone(), color, LINE_WIDTH);

    let marker_step = (candles.len() / MAX_MARKERS).max(1);
    for (i, point) in points.into_iter().enumerate() {
        if i % marker_step == 0 {
            frame.fill_circle(point, MARKER_RADIUS, color);
        }
    }
}

/// High-low wick plus open-close body per candle; equal open/close takes the
/// doji branch.
pub fn draw_candles(frame: &mut Frame, scale: &PriceScale, candles: &[Candle], theme: &Theme) {
    if candles.is_empty() {
        return;
    }
    let candle_width =
        (scale.slot_width() * CANDLE_WIDTH_FACTOR).clamp(MIN_CANDLE_WIDTH, MAX_CANDLE_WIDTH);

    for (i, candle) in candles.iter().enumerate() {
        let x = scale.x(i);
        let color = if candle.is_bullish() {
            theme.bullish
        } else {
            theme.bearish
        };

        frame.stroke_path(
            vec![
                Point::new(x, scale.y(candle.high)),
                Point::new(x, scale.y(candle.low)),
            ],
            color,
            WICK_WIDTH,
        );

        let open_y = scale.y(candle.open);
        let close_y = scale.y(candle.close);
        let body_top = open_y.min(close_y);
        let body_height = (open_y - close_y).abs();

        if body_height < DOJI_THRESHOLD {
            frame.stroke_path(
                vec![
                    Point::new(x - candle_width / 2.0, body_top),
                    Point::new(x + candle_width / 2.0, body_top),
                ],
                color,
                BODY_STROKE_WIDTH,
            );
        } else {
            let top_left = Point::new(x - candle_width / 2.0, body_top);
            let size = Size::new(candle_width, body_height);
            frame.fill_rectangle(top_left, size, color);
            frame.stroke_rectangle(top_left, size, color, BODY_STROKE_WIDTH);
        }
    }
}

/// Translucent volume bars along the bottom padding, scaled to the busiest
/// bucket.
pub fn draw_volume(
    frame: &mut Frame,
    layout: &ChartLayout,
    scale: &PriceScale,
    candles: &[Candle],
    theme: &Theme,
) {
    let max_volume = candles.iter().fold(0.0f32, |acc, c| acc.max(c.volume));
    if max_volume <= 0.0 {
        return;
    }

    for (i, candle) in candles.iter().enumerate() {
        let bar_height = candle.volume / max_volume * VOLUME_BAND;
        let x = scale.x(i);
        frame.fill_rectangle(
            Point::new(x - VOLUME_BAR_HALF_WIDTH, layout.bottom() - bar_height),
            Size::new(VOLUME_BAR_HALF_WIDTH * 2.0, bar_height),
            theme.volume,
        );
    }
}
