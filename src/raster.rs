// ============================================================================
// SOFTWARE RASTERIZER
// ============================================================================
//
// Everything draws into a tightly packed RGBA8 frame, the layout `pixels`
// hands out from `Pixels::frame_mut`. Coordinates given to `Canvas` methods
// are in the local frame of the current transform; the free functions below
// work in device pixels.

use crate::config::Color;
use crate::transform::Transform;
use rusttype::{point, Font, PositionedGlyph, Scale};

pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: usize,
    height: usize,
    transform: Transform,
    saved: Vec<Transform>,
}

impl<'a> Canvas<'a> {
    pub fn new(frame: &'a mut [u8], width: usize, height: usize) -> Self {
        debug_assert!(frame.len() >= width * height * 4);
        Self {
            frame,
            width,
            height,
            transform: Transform::identity(),
            saved: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self, color: Color) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[color.r, color.g, color.b, 0xff]);
        }
    }

    /// Reads back a device pixel. `None` outside the frame.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        Some(Color::new(
            self.frame[idx],
            self.frame[idx + 1],
            self.frame[idx + 2],
        ))
    }

    // ------------------------------------------------------------------------
    // Transform stack
    // ------------------------------------------------------------------------

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn save_depth(&self) -> usize {
        self.saved.len()
    }

    pub fn save(&mut self) {
        self.saved.push(self.transform);
    }

    /// Pops the last saved transform. Returns `false` if nothing was saved.
    pub fn restore(&mut self) -> bool {
        match self.saved.pop() {
            Some(transform) => {
                self.transform = transform;
                true
            }
            None => false,
        }
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.transform = self
            .transform
            .then_apply(&Transform::translation(dx, dy));
    }

    pub fn rotate_about(&mut self, degrees: f64, pivot: (f64, f64)) {
        self.transform = self
            .transform
            .then_apply(&Transform::rotation_about(degrees, pivot));
    }

    // ------------------------------------------------------------------------
    // Primitives
    // ------------------------------------------------------------------------

    pub fn stroke_circle(&mut self, center: (f64, f64), radius: f64, width: f32, color: Color) {
        let center = self.transform.apply(center);
        draw_ring_aa(self, center, radius, width as f64, color);
    }

    pub fn line(&mut self, from: (f64, f64), to: (f64, f64), thickness: f32, color: Color) {
        let (from, to) = (self.transform.apply(from), self.transform.apply(to));
        draw_thick_line_aa(self, from, to, thickness, color);
    }

    pub fn fill_polygon(&mut self, points: &[(f64, f64)], color: Color) {
        let device: Vec<(f64, f64)> = points.iter().map(|p| self.transform.apply(*p)).collect();
        fill_polygon_aa(self, &device, color);
    }

    /// Draws `text` centered on its pixel bounding box at `anchor`.
    pub fn text(&mut self, anchor: (f64, f64), text: &str, font: &Font, size: f32, color: Color) {
        let (x, y) = self.transform.apply(anchor);
        draw_text(
            self,
            x.round() as i32,
            y.round() as i32,
            text,
            font,
            Scale::uniform(size),
            color,
        );
    }
}

// ============================================================================
// DRAWING PRIMITIVES
// ============================================================================

fn set_pixel(canvas: &mut Canvas, x: i64, y: i64, color: Color, alpha: f32) {
    if x < 0 || y < 0 || x as usize >= canvas.width || y as usize >= canvas.height {
        return;
    }
    let idx = (y as usize * canvas.width + x as usize) * 4;
    let frame = &mut *canvas.frame;
    let a = alpha.clamp(0.0, 1.0);
    let blend = |src: u8, dst: u8| (src as f32 * a + dst as f32 * (1.0 - a)).round() as u8;
    let out = [
        blend(color.r, frame[idx]),
        blend(color.g, frame[idx + 1]),
        blend(color.b, frame[idx + 2]),
        0xff,
    ];
    frame[idx..idx + 4].copy_from_slice(&out);
}

/// Inclusive pixel range covering `[min, max]` padded by `pad`, clipped to `0..limit`.
fn clipped_span(min: f64, max: f64, pad: f64, limit: usize) -> std::ops::RangeInclusive<i64> {
    let lo = ((min - pad).floor() as i64).max(0);
    let hi = ((max + pad).ceil() as i64).min(limit as i64 - 1);
    lo..=hi
}

fn distance_to_segment(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq > 0.0 {
        (((p.0 - a.0) * dx + (p.1 - a.1) * dy) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let (lx, ly) = (a.0 + t * dx, a.1 + t * dy);
    ((lx - p.0).powi(2) + (ly - p.1).powi(2)).sqrt()
}

fn draw_thick_line_aa(
    canvas: &mut Canvas,
    from: (f64, f64),
    to: (f64, f64),
    thickness: f32,
    color: Color,
) {
    let pad = thickness.ceil() as f64 + 1.0;
    let xs = clipped_span(from.0.min(to.0), from.0.max(to.0), pad, canvas.width);
    let ys = clipped_span(from.1.min(to.1), from.1.max(to.1), pad, canvas.height);
    let half = thickness as f64 / 2.0;
    for y in ys {
        for x in xs.clone() {
            let dist = distance_to_segment((x as f64, y as f64), from, to);
            let aa = (1.0 - (dist - half).clamp(0.0, 1.0)) as f32;
            if aa > 0.01 {
                set_pixel(canvas, x, y, color, aa);
            }
        }
    }
}

fn draw_ring_aa(canvas: &mut Canvas, center: (f64, f64), radius: f64, width: f64, color: Color) {
    let inner = (radius - width / 2.0).max(0.0);
    let outer = radius + width / 2.0;
    let xs = clipped_span(center.0 - outer, center.0 + outer, 1.0, canvas.width);
    let ys = clipped_span(center.1 - outer, center.1 + outer, 1.0, canvas.height);
    for y in ys {
        for x in xs.clone() {
            let dist = ((x as f64 - center.0).powi(2) + (y as f64 - center.1).powi(2)).sqrt();
            let aa = if dist > outer {
                1.0 - (dist - outer).min(1.0)
            } else if dist < inner {
                1.0 - (inner - dist).min(1.0)
            } else {
                1.0
            };
            if aa > 0.01 {
                set_pixel(canvas, x, y, color, aa as f32);
            }
        }
    }
}

/// Even-odd containment test.
fn polygon_contains(points: &[(f64, f64)], p: (f64, f64)) -> bool {
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (xi, yi) = points[i];
        let (xj, yj) = points[j];
        if (yi > p.1) != (yj > p.1) && p.0 < (xj - xi) * (p.1 - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

fn fill_polygon_aa(canvas: &mut Canvas, points: &[(f64, f64)], color: Color) {
    if points.len() < 3 {
        return;
    }
    let (min_x, max_x, min_y, max_y) = points.iter().fold(
        (f64::MAX, f64::MIN, f64::MAX, f64::MIN),
        |(min_x, max_x, min_y, max_y), &(x, y)| {
            (min_x.min(x), max_x.max(x), min_y.min(y), max_y.max(y))
        },
    );
    let xs = clipped_span(min_x, max_x, 1.0, canvas.width);
    let ys = clipped_span(min_y, max_y, 1.0, canvas.height);
    for y in ys {
        for x in xs.clone() {
            let p = (x as f64, y as f64);
            let aa = if polygon_contains(points, p) {
                1.0
            } else {
                let edge = (0..points.len())
                    .map(|i| distance_to_segment(p, points[i], points[(i + 1) % points.len()]))
                    .fold(f64::MAX, f64::min);
                1.0 - edge.min(1.0)
            };
            if aa > 0.01 {
                set_pixel(canvas, x, y, color, aa as f32);
            }
        }
    }
}

fn draw_text(
    canvas: &mut Canvas,
    x: i32,
    y: i32,
    text: &str,
    font: &Font,
    scale: Scale,
    color: Color,
) {
    let v_metrics = font.v_metrics(scale);
    let glyphs: Vec<PositionedGlyph> = font
        .layout(text, scale, point(0.0, v_metrics.ascent))
        .collect();
    // Bounding box of the whole string
    let (min_x, max_x, min_y, max_y) = glyphs.iter().filter_map(|g| g.pixel_bounding_box()).fold(
        (i32::MAX, i32::MIN, i32::MAX, i32::MIN),
        |(min_x, max_x, min_y, max_y), bb| {
            (
                min_x.min(bb.min.x),
                max_x.max(bb.max.x),
                min_y.min(bb.min.y),
                max_y.max(bb.max.y),
            )
        },
    );
    let width_px = if min_x < max_x { max_x - min_x } else { 0 };
    let height_px = if min_y < max_y { max_y - min_y } else { 0 };
    let offset_x = x - width_px / 2;
    let offset_y = y - height_px / 2;
    for glyph in glyphs {
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, v| {
                let px = offset_x + gx as i32 + bb.min.x - min_x;
                let py = offset_y + gy as i32 + bb.min.y - min_y;
                set_pixel(canvas, px as i64, py as i64, color, v);
            });
        }
    }
}
