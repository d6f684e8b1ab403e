//! Reference gridlines and axis labels.

use chrono::{TimeZone, Utc};
use data::config::theme::Theme;
use feed::{Candle, DAY_MS};

use super::TEXT_SIZE;
use super::scale::{ChartLayout, PriceScale};
use crate::frame::{Frame, Point, Text, TextAnchor};

/// Horizontal price bands between the top and bottom padding.
pub const PRICE_ROWS: usize = 6;

/// Time labels never exceed this many slots, however long the series is.
pub const MAX_TIME_SLOTS: usize = 8;

const GRID_LINE_WIDTH: f32 = 1.0;
const PRICE_LABEL_GAP: f32 = 10.0;
const TIME_LABEL_DROP: f32 = 20.0;

pub fn format_currency(price: f32) -> String {
    format!("${price:.2}")
}

/// `Nov 14` for daily buckets, `09:35` for intraday ones.
pub fn format_time_label(time_ms: u64, intraday: bool) -> String {
    let Some(stamp) = Utc.timestamp_millis_opt(time_ms as i64).single() else {
        return String::new();
    };
    if intraday {
        stamp.format("%H:%M").to_string()
    } else {
        stamp.format("%b %-d").to_string()
    }
}

pub fn draw(
    frame: &mut Frame,
    layout: &ChartLayout,
    scale: &PriceScale,
    candles: &[Candle],
    theme: &Theme,
) {
    draw_price_rows(frame, layout, scale, theme);
    draw_time_slots(frame, layout, candles, theme);
}

fn draw_price_rows(frame: &mut Frame, layout: &ChartLayout, scale: &PriceScale, theme: &Theme) {
    for row in 0..=PRICE_ROWS {
        let y = layout.top() + row as f32 * layout.inner_height() / PRICE_ROWS as f32;
        frame.stroke_path(
            vec![
                Point::new(layout.left(), y),
                Point::new(layout.right(), y),
            ],
            theme.grid,
            GRID_LINE_WIDTH,
        );

        let price = scale.max() - row as f32 * scale.range() / PRICE_ROWS as f32;
        frame.fill_text(Text {
            content: format_currency(price),
            position: Point::new(layout.left() - PRICE_LABEL_GAP, y + TEXT_SIZE / 3.0),
            color: theme.muted_text,
            size: TEXT_SIZE,
            anchor: TextAnchor::End,
        });
    }
}

fn draw_time_slots(frame: &mut Frame, layout: &ChartLayout, candles: &[Candle], theme: &Theme) {
    let slots = MAX_TIME_SLOTS.min(candles.len());
    if slots == 0 {
        return;
    }

    let intraday = candles
        .windows(2)
        .next()
        .is_some_and(|pair| pair[1].time.saturating_sub(pair[0].time) < DAY_MS);

    for slot in 0..=slots {
        let x = layout.left() + slot as f32 * layout.inner_width() / slots as f32;
        frame.stroke_path(
            vec![
                Point::new(x, layout.top()),
                Point::new(x, layout.bottom()),
            ],
            theme.grid,
            GRID_LINE_WIDTH,
        );

        // Subsample: the label index walks the series, not the slot axis.
        if slot < slots {
            let index = slot * (candles.len() - 1) / slots;
            frame.fill_text(Text {
                content: format_time_label(candles[index].time, intraday),
                position: Point::new(x, layout.bottom() + TIME_LABEL_DROP),
                color: theme.muted_text,
                size: TEXT_SIZE - 1.0,
                anchor: TextAnchor::Middle,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::DrawCommand;

    fn daily_candles(n: usize) -> Vec<Candle> {
        (0..n)
            .map(|i| Candle {
                time: 1_700_000_000_000 + i as u64 * DAY_MS,
                open: 100.0,
                high: 101.0,
                low: 99.0,
                close: 100.0,
                volume: 1_000_000.0,
            })
            .collect()
    }

    fn text_labels(frame: &Frame) -> Vec<String> {
        frame
            .commands()
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::FillText(text) => Some(text.content.clone()),
                _ => None,
            })
            .collect()
    }

    fn render_grid(candles: &[Candle]) -> Frame {
        let layout = ChartLayout::new(800.0, 400.0, 50.0);
        let scale = PriceScale::new(layout, 90.0, 110.0, candles.len().max(1));
        let mut frame = Frame::new(800.0, 400.0);
        draw(&mut frame, &layout, &scale, candles, &data::config::theme::dark());
        frame
    }

    #[test]
    fn price_labels_cover_every_row() {
        let frame = render_grid(&daily_candles(30));
        let labels = text_labels(&frame);
        let price_labels: Vec<_> = labels.iter().filter(|l| l.starts_with('$')).collect();
        assert_eq!(price_labels.len(), PRICE_ROWS + 1);
        assert!(price_labels.contains(&&"$110.00".to_string()));
        assert!(price_labels.contains(&&"$90.00".to_string()));
    }

    #[test]
    fn time_labels_are_capped() {
        for n in [3, 8, 30, 365, 1825] {
            let frame = render_grid(&daily_candles(n));
            let time_labels = text_labels(&frame)
                .into_iter()
                .filter(|l| !l.starts_with('$'))
                .count();
            assert_eq!(time_labels, MAX_TIME_SLOTS.min(n));
        }
    }

    #[test]
    fn intraday_series_uses_clock_labels() {
        let candles: Vec<Candle> = (0..13)
            .map(|i| Candle {
                time: 1_700_000_000_000 + i as u64 * 30 * 60 * 1_000,
                close: 100.0,
                ..Candle::default()
            })
            .collect();
        let frame = render_grid(&candles);
        let labels = text_labels(&frame);
        assert!(
            labels
                .iter()
                .filter(|l| !l.starts_with('$'))
                .all(|l| l.contains(':')),
            "expected HH:MM labels, got {labels:?}"
        );
    }

    #[test]
    fn empty_series_draws_price_rows_only() {
        let frame = render_grid(&[]);
        assert!(text_labels(&frame).iter().all(|l| l.starts_with('$')));
    }
}
