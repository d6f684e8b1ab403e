//! SVG surface adapter.
//!
//! Walks the frame's command list once and emits standalone SVG markup.
//! Gradients have to live in `<defs>`, so fills referencing one get a
//! generated id on the way through.

use std::fmt::Write;

use palette::Srgba;

use super::Surface;
use crate::frame::{DrawCommand, Fill, Frame, Point, TextAnchor};

const FONT_FAMILY: &str = "monospace";

pub struct SvgSurface;

impl SvgSurface {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SvgSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for SvgSurface {
    type Output = String;

    fn present(&mut self, frame: &Frame) -> String {
        let mut defs = String::new();
        let mut body = String::new();
        let mut gradient_count = 0usize;

        for command in frame.commands() {
            // Infallible: fmt::Write into a String cannot error.
            let _ = write_command(&mut defs, &mut body, &mut gradient_count, command);
        }

        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = frame.width(),
            h = frame.height(),
        );
        if !defs.is_empty() {
            let _ = writeln!(out, "<defs>\n{defs}</defs>");
        }
        out.push_str(&body);
        out.push_str("</svg>\n");
        out
    }
}

fn write_command(
    defs: &mut String,
    body: &mut String,
    gradient_count: &mut usize,
    command: &DrawCommand,
) -> std::fmt::Result {
    match command {
        DrawCommand::FillRect { rect, color } => writeln!(
            body,
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            css_color(*color),
        ),
        DrawCommand::StrokeRect { rect, color, width } => writeln!(
            body,
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="none" stroke="{}" stroke-width="{width}"/>"#,
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            css_color(*color),
        ),
        DrawCommand::StrokePath {
            points,
            color,
            width,
            dash,
        } => {
            let dasharray = match dash {
                Some([on, off]) => format!(r#" stroke-dasharray="{on} {off}""#),
                None => String::new(),
            };
            writeln!(
                body,
                r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="{width}" stroke-linejoin="round"{dasharray}/>"#,
                points_attr(points),
                css_color(*color),
            )
        }
        DrawCommand::FillPath { points, fill } => {
            let fill_attr = match fill {
                Fill::Solid(color) => css_color(*color),
                Fill::Gradient(gradient) => {
                    let id = format!("grad{gradient_count}");
                    *gradient_count += 1;
                    writeln!(
                        defs,
                        r#"<linearGradient id="{id}" x1="{}" y1="{}" x2="{}" y2="{}" gradientUnits="userSpaceOnUse">"#,
                        gradient.start.x, gradient.start.y, gradient.end.x, gradient.end.y,
                    )?;
                    for (offset, color) in gradient.stops {
                        writeln!(
                            defs,
                            r#"<stop offset="{}" stop-color="{}" stop-opacity="{}"/>"#,
                            offset,
                            css_rgb(color),
                            color.alpha,
                        )?;
                    }
                    writeln!(defs, "</linearGradient>")?;
                    format!("url(#{id})")
                }
            };
            writeln!(
                body,
                r#"<polygon points="{}" fill="{fill_attr}"/>"#,
                points_attr(points),
            )
        }
        DrawCommand::FillCircle {
            center,
            radius,
            color,
        } => writeln!(
            body,
            r#"<circle cx="{}" cy="{}" r="{radius}" fill="{}"/>"#,
            center.x,
            center.y,
            css_color(*color),
        ),
        DrawCommand::FillText(text) => {
            let anchor = match text.anchor {
                TextAnchor::Start => "start",
                TextAnchor::Middle => "middle",
                TextAnchor::End => "end",
            };
            writeln!(
                body,
                r#"<text x="{}" y="{}" font-family="{FONT_FAMILY}" font-size="{}" fill="{}" text-anchor="{anchor}">{}</text>"#,
                text.position.x,
                text.position.y,
                text.size,
                css_color(text.color),
                escape_text(&text.content),
            )
        }
    }
}

fn points_attr(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

fn channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn css_rgb(color: Srgba) -> String {
    format!(
        "rgb({},{},{})",
        channel(color.red),
        channel(color.green),
        channel(color.blue),
    )
}

fn css_color(color: Srgba) -> String {
    if color.alpha >= 1.0 {
        css_rgb(color)
    } else {
        format!(
            "rgba({},{},{},{:.3})",
            channel(color.red),
            channel(color.green),
            channel(color.blue),
            color.alpha,
        )
    }
}

fn escape_text(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
