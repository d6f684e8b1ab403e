//! The pure render target: a frame is an ordered list of draw commands.
//!
//! Renderers only ever append commands; surface adapters replay them against
//! something concrete. Nothing here touches a real drawing backend.

use palette::Srgba;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(top_left: Point, size: Size) -> Self {
        Self {
            x: top_left.x,
            y: top_left.y,
            width: size.width,
            height: size.height,
        }
    }
}

/// Two-stop vertical/linear gradient; stop offsets are 0..=1 along the axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearGradient {
    pub start: Point,
    pub end: Point,
    pub stops: [(f32, Srgba); 2],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fill {
    Solid(Srgba),
    Gradient(LinearGradient),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub content: String,
    pub position: Point,
    pub color: Srgba,
    pub size: f32,
    pub anchor: TextAnchor,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        color: Srgba,
    },
    StrokeRect {
        rect: Rect,
        color: Srgba,
        width: f32,
    },
    StrokePath {
        points: Vec<Point>,
        color: Srgba,
        width: f32,
        dash: Option<[f32; 2]>,
    },
    FillPath {
        points: Vec<Point>,
        fill: Fill,
    },
    FillCircle {
        center: Point,
        radius: f32,
        color: Srgba,
    },
    FillText(Text),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    width: f32,
    height: f32,
    commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    pub fn fill_rectangle(&mut self, top_left: Point, size: Size, color: Srgba) {
        self.commands.push(DrawCommand::FillRect {
            rect: Rect::new(top_left, size),
            color,
        });
    }

    pub fn stroke_rectangle(&mut self, top_left: Point, size: Size, color: Srgba, width: f32) {
        self.commands.push(DrawCommand::StrokeRect {
            rect: Rect::new(top_left, size),
            color,
            width,
        });
    }

    pub fn stroke_path(&mut self, points: Vec<Point>, color: Srgba, width: f32) {
        self.commands.push(DrawCommand::StrokePath {
            points,
            color,
            width,
            dash: None,
        });
    }

    pub fn stroke_dashed(&mut self, points: Vec<Point>, color: Srgba, width: f32, dash: [f32; 2]) {
        self.commands.push(DrawCommand::StrokePath {
            points,
            color,
            width,
            dash: Some(dash),
        });
    }

    pub fn fill_path(&mut self, points: Vec<Point>, fill: Fill) {
        self.commands.push(DrawCommand::FillPath { points, fill });
    }

    pub fn fill_circle(&mut self, center: Point, radius: f32, color: Srgba) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    pub fn fill_text(&mut self, text: Text) {
        self.commands.push(DrawCommand::FillText(text));
    }
}
