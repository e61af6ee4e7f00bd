// The drawing surface the animator renders into. The browser implementation
// lives in `web::CanvasSurface`; `RecordingSurface` keeps a log of draw calls
// for headless use.

use crate::color::Color;
use vecmath::Vector2;

pub trait DrawingSurface {
    fn set_size(&mut self, width: f64, height: f64);
    fn clear(&mut self, width: f64, height: f64);
    fn fill_circle(&mut self, center: Vector2<f64>, radius: f64, color: Color);
    fn stroke_line(&mut self, from: Vector2<f64>, to: Vector2<f64>, color: Color, width: f64);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    SetSize {
        width: f64,
        height: f64,
    },
    Clear {
        width: f64,
        height: f64,
    },
    Circle {
        center: Vector2<f64>,
        radius: f64,
        color: Color,
    },
    Line {
        from: Vector2<f64>,
        to: Vector2<f64>,
        color: Color,
        width: f64,
    },
}

#[derive(Default, Debug)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        RecordingSurface::default()
    }

    pub fn circles(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }

    pub fn lines(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count()
    }
}

impl DrawingSurface for RecordingSurface {
    fn set_size(&mut self, width: f64, height: f64) {
        self.commands.push(DrawCommand::SetSize { width, height });
    }

    fn clear(&mut self, width: f64, height: f64) {
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn fill_circle(&mut self, center: Vector2<f64>, radius: f64, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn stroke_line(&mut self, from: Vector2<f64>, to: Vector2<f64>, color: Color, width: f64) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
    }
}
