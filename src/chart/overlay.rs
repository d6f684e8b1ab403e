//! Latest-price overlay: one dashed reference line and its label.

use data::config::theme::Theme;
use feed::Candle;

use super::TEXT_SIZE;
use super::grid::format_currency;
use super::scale::{ChartLayout, PriceScale};
use crate::frame::{Frame, Point, Text, TextAnchor};

const DASH: [f32; 2] = [5.0, 5.0];
const LINE_WIDTH: f32 = 1.0;
const LABEL_GAP: f32 = 5.0;

pub fn draw(
    frame: &mut Frame,
    layout: &ChartLayout,
    scale: &PriceScale,
    candles: &[Candle],
    theme: &Theme,
) {
    let Some(latest) = candles.last() else {
        return;
    };
    let y = scale.y(latest.close);

    frame.stroke_dashed(
        vec![
            Point::new(layout.left(), y),
            Point::new(layout.right(), y),
        ],
        theme.accent,
        LINE_WIDTH,
        DASH,
    );

    frame.fill_text(Text {
        content: format_currency(latest.close),
        position: Point::new(layout.right() + LABEL_GAP, y + TEXT_SIZE / 3.0),
        color: theme.accent,
        size: TEXT_SIZE,
        anchor: TextAnchor::Start,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::DrawCommand;

    #[test]
    fn dashed_line_sits_at_latest_close() {
        let layout = ChartLayout::new(800.0, 400.0, 50.0);
        let scale = PriceScale::new(layout, 100.0, 200.0, 2);
        let candles = [
            Candle {
                close: 100.0,
                ..Candle::default()
            },
            Candle {
                close: 150.0,
                ..Candle::default()
            },
        ];

        let mut frame = Frame::new(800.0, 400.0);
        draw(&mut frame, &layout, &scale, &candles, &data::config::theme::dark());

        let dashed = frame.commands().iter().find_map(|cmd| match cmd {
            DrawCommand::StrokePath {
                points,
                dash: Some(dash),
                ..
            } => Some((points.clone(), *dash)),
            _ => None,
        });
        let (points, dash) = dashed.expect("no dashed overlay line");
        assert_eq!(dash, DASH);
        assert_eq!(points[0].y, scale.y(150.0));
        assert_eq!(points[0].x, layout.left());
        assert_eq!(points[1].x, layout.right());

        let label = frame.commands().iter().find_map(|cmd| match cmd {
            DrawCommand::FillText(text) => Some(text.content.clone()),
            _ => None,
        });
        assert_eq!(label.as_deref(), Some("$150.00"));
    }

    #[test]
    fn empty_series_draws_nothing() {
        let layout = ChartLayout::new(800.0, 400.0, 50.0);
        let scale = PriceScale::new(layout, 0.0, 1.0, 0);
        let mut frame = Frame::new(800.0, 400.0);
        draw(&mut frame, &layout, &scale, &[], &data::config::theme::dark());
        assert!(frame.commands().is_empty());
    }
}
