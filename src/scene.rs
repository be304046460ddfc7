// ============================================================================
// RETAINED MODE ABSTRACTIONS
// ============================================================================

use crate::config::Color;
use crate::raster::Canvas;
use log::debug;
use rusttype::Font;

/// One drawing operation. Points are in the local frame of whatever
/// transform is current when the command is replayed.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Save,
    Restore,
    Translate {
        dx: f64,
        dy: f64,
    },
    Rotate {
        degrees: f64,
        pivot: (f64, f64),
    },
    CircleStroke {
        center: (f64, f64),
        radius: f64,
        width: f32,
        color: Color,
    },
    Line {
        from: (f64, f64),
        to: (f64, f64),
        thickness: f32,
        color: Color,
    },
    FillPolygon {
        points: Vec<(f64, f64)>,
        color: Color,
    },
    /// Text centered on its own bounding box at `anchor`.
    Text {
        anchor: (f64, f64),
        text: String,
        font_size: f32,
        color: Color,
    },
}

#[derive(Clone, Debug, Default)]
pub struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_command(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Replays the scene onto `canvas`.
    ///
    /// Text needs a font; without one, text commands are skipped so the
    /// geometry can still be rasterized headless.
    pub fn render(&self, canvas: &mut Canvas, font: Option<&Font>) {
        for command in &self.commands {
            match command {
                DrawCommand::Clear(color) => canvas.clear(*color),
                DrawCommand::Save => canvas.save(),
                DrawCommand::Restore => {
                    if !canvas.restore() {
                        debug!("restore without matching save ignored");
                    }
                }
                DrawCommand::Translate { dx, dy } => canvas.translate(*dx, *dy),
                DrawCommand::Rotate { degrees, pivot } => canvas.rotate_about(*degrees, *pivot),
                DrawCommand::CircleStroke {
                    center,
                    radius,
                    width,
                    color,
                } => canvas.stroke_circle(*center, *radius, *width, *color),
                DrawCommand::Line {
                    from,
                    to,
                    thickness,
                    color,
                } => canvas.line(*from, *to, *thickness, *color),
                DrawCommand::FillPolygon { points, color } => canvas.fill_polygon(points, *color),
                DrawCommand::Text {
                    anchor,
                    text,
                    font_size,
                    color,
                } => {
                    if let Some(font) = font {
                        canvas.text(*anchor, text, font, *font_size, *color);
                    }
                }
            }
        }
    }
}
