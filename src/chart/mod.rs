//! Chart assembly: one immutable view of a candle series, rendered into a
//! draw-command frame.
//!
//! `render` is pure: same candles, options, and geometry give the same frame,
//! which is what makes the mapping and geometry selection testable without a
//! real drawing backend.

pub mod grid;
pub mod overlay;
pub mod scale;
pub mod series;

use data::SeriesStats;
use data::chart::ChartKind;
use data::config::theme::Theme;
use feed::Candle;

use crate::frame::{Frame, Point, Size};
use scale::{ChartLayout, PriceScale};

pub const TEXT_SIZE: f32 = 12.0;
pub const PADDING: f32 = 50.0;

pub struct Chart<'a> {
    candles: &'a [Candle],
    stats: Option<SeriesStats>,
    kind: ChartKind,
    theme: &'a Theme,
    expert_mode: bool,
}

impl<'a> Chart<'a> {
    pub fn new(candles: &'a [Candle], theme: &'a Theme) -> Self {
        Self {
            candles,
            stats: SeriesStats::measure(candles),
            kind: ChartKind::default(),
            theme,
            expert_mode: false,
        }
    }

    pub fn with_kind(mut self, kind: ChartKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_expert_mode(mut self, expert_mode: bool) -> Self {
        self.expert_mode = expert_mode;
        self
    }

    pub fn stats(&self) -> Option<&SeriesStats> {
        self.stats.as_ref()
    }

    /// Background, grid, series, volume, overlay — in that order.
    ///
    /// Without data the frame holds the cleared background alone; every other
    /// pass is skipped rather than faulting.
    pub fn render(&self, width: f32, height: f32) -> Frame {
        let mut frame = Frame::new(width, height);
        frame.fill_rectangle(
            Point::ORIGIN,
            Size::new(width, height),
            self.theme.background,
        );

        let Some(stats) = self.stats else {
            return frame;
        };

        let layout = ChartLayout::new(width, height, PADDING);
        let scale = PriceScale::new(layout, stats.min_price, stats.max_price, self.candles.len());

        grid::draw(&mut frame, &layout, &scale, self.candles, self.theme);

        match self.kind {
            ChartKind::Line => series::draw_line(
                &mut frame,
                &layout,
                &scale,
                self.candles,
                &stats,
                self.theme,
                false,
            ),
            ChartKind::Area => series::draw_line(
                &mut frame,
                &layout,
                &scale,
                self.candles,
                &stats,
                self.theme,
                true,
            ),
            ChartKind::Candlestick => {
                series::draw_candles(&mut frame, &scale, self.candles, self.theme);
            }
        }

        if self.expert_mode {
            series::draw_volume(&mut frame, &layout, &scale, self.candles, self.theme);
        }

        overlay::draw(&mut frame, &layout, &scale, self.candles, self.theme);

        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::DrawCommand;
    use feed::synthetic::SyntheticFeed;
    use feed::Timeframe;

    const END_TIME: u64 = 1_760_000_000_000;

    fn month_of_data() -> Vec<Candle> {
        SyntheticFeed::from_seed(42).history("AAPL", Timeframe::Month1, END_TIME)
    }

    #[test]
    fn month_pipeline_end_to_end() {
        let candles = month_of_data();
        assert_eq!(candles.len(), 30);

        let theme = data::config::theme::dark();
        let chart = Chart::new(&candles, &theme);

        let stats = chart.stats().expect("stats for a populated series");
        assert!(stats.min_price <= stats.max_price);
        assert_eq!(stats.start_price, candles[0].close);
        assert_eq!(stats.end_price, candles[29].close);
        assert!(stats.volatility_pct >= 0.0);

        let frame = chart.render(800.0, 400.0);
        assert!(frame.commands().len() > 1);
        assert!(
            frame
                .commands()
                .iter()
                .any(|cmd| matches!(cmd, DrawCommand::FillText(_)))
        );
    }

    #[test]
    fn empty_series_renders_background_only() {
        let theme = data::config::theme::dark();
        let chart = Chart::new(&[], &theme);
        assert!(chart.stats().is_none());

        let frame = chart.render(800.0, 400.0);
        assert_eq!(frame.commands().len(), 1);
        assert!(matches!(frame.commands()[0], DrawCommand::FillRect { .. }));
    }

    #[test]
    fn expert_mode_adds_volume_bars() {
        let candles = month_of_data();
        let theme = data::config::theme::dark();

        let plain = Chart::new(&candles, &theme).render(800.0, 400.0);
        let expert = Chart::new(&candles, &theme)
            .with_expert_mode(true)
            .render(800.0, 400.0);
        assert!(expert.commands().len() > plain.commands().len());
    }

    #[test]
    fn kinds_produce_distinct_geometry() {
        let candles = month_of_data();
        let theme = data::config::theme::dark();

        let area = Chart::new(&candles, &theme)
            .with_kind(ChartKind::Area)
            .render(800.0, 400.0);
        let sticks = Chart::new(&candles, &theme)
            .with_kind(ChartKind::Candlestick)
            .render(800.0, 400.0);

        assert!(
            area.commands()
                .iter()
                .any(|cmd| matches!(cmd, DrawCommand::FillPath { .. }))
        );
        assert!(
            !sticks
                .commands()
                .iter()
                .any(|cmd| matches!(cmd, DrawCommand::FillPath { .. }))
        );
    }

    #[test]
    fn same_seed_renders_identical_frames() {
        let theme = data::config::theme::dark();
        let first = month_of_data();
        let second = month_of_data();
        let a = Chart::new(&first, &theme).render(800.0, 400.0);
        let b = Chart::new(&second, &theme).render(800.0, 400.0);
        assert_eq!(a, b);
    }
}
