// ============================================================================
// CLOCK FACE RENDERER
// ============================================================================
//
// Turns a `ClockState` into a `Scene`. Angles follow the screen convention
// `x = cos θ, y = sin θ` with y pointing down, and every hand is modelled
// pointing straight down, which is why each hand rotation carries +180°.

use crate::config::FaceGeometry;
use crate::scene::{DrawCommand, Scene};
use crate::{ClockConfig, ClockState};

/// Degrees between neighbouring hour ticks.
pub const TICK_STEP_DEGREES: u16 = 30;

/// Largest square that fits the frame, centered in it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub side: f64,
}

impl Viewport {
    pub fn square_fit(width: usize, height: usize) -> Self {
        let side = width.min(height) as f64;
        Self {
            x: (width as f64 - side) / 2.0,
            y: (height as f64 - side) / 2.0,
            side,
        }
    }

    /// Half the side length; also the center in viewport coordinates.
    pub fn half_extent(&self) -> f64 {
        self.side / 2.0
    }
}

/// Label shown at a tick: 0° reads "12", every other tick its hour.
pub fn numeral_label(tick_degrees: u16) -> String {
    match tick_degrees / TICK_STEP_DEGREES {
        0 => "12".to_string(),
        hour => hour.to_string(),
    }
}

pub fn is_quarter(tick_degrees: u16) -> bool {
    matches!(tick_degrees, 0 | 90 | 180 | 270)
}

/// Closed outline of an hour/minute hand pointing down from the center.
///
/// `length` and the shoulder are fractions of the half-extent, so the shape
/// scales with the canvas while the dial radius stays fixed.
pub fn hand_outline(center: f64, length: f64, geometry: &FaceGeometry) -> Vec<(f64, f64)> {
    let shoulder = center * geometry.hand_shoulder;
    vec![
        (center, center),
        (center + shoulder, center + shoulder),
        (center, center + center * length),
        (center - shoulder, center + shoulder),
    ]
}

/// Builds the full face for `state` on a `width` x `height` frame.
pub fn build_face_scene(
    state: &ClockState,
    config: &ClockConfig,
    width: usize,
    height: usize,
) -> Scene {
    let geometry = &config.geometry;
    let palette = &config.palette;
    let viewport = Viewport::square_fit(width, height);
    let c = viewport.half_extent();
    let center = (c, c);

    let mut scene = Scene::new();
    scene.add_command(DrawCommand::Clear(palette.background));
    scene.add_command(DrawCommand::Save);
    scene.add_command(DrawCommand::Translate {
        dx: viewport.x,
        dy: viewport.y,
    });

    scene.add_command(DrawCommand::CircleStroke {
        center,
        radius: geometry.dial_radius,
        width: geometry.dial_stroke_width,
        color: palette.light,
    });

    let (outer, inner) = (geometry.tick_outer_radius(), geometry.tick_inner_radius());
    let numeral_radius = geometry.numeral_radius();
    for tick_degrees in (0..360).step_by(TICK_STEP_DEGREES as usize) {
        let theta = (tick_degrees as f64).to_radians();
        let tone = if is_quarter(tick_degrees) {
            palette.dark
        } else {
            palette.light
        };
        scene.add_command(DrawCommand::Line {
            from: (c + theta.cos() * outer, c + theta.sin() * outer),
            to: (c + theta.cos() * inner, c + theta.sin() * inner),
            thickness: geometry.tick_stroke_width,
            color: tone,
        });

        // Numerals are a quarter turn behind the ticks so "12" lands on top.
        let label_theta = theta - std::f64::consts::FRAC_PI_2;
        scene.add_command(DrawCommand::Text {
            anchor: (
                c + label_theta.cos() * numeral_radius,
                c + label_theta.sin() * numeral_radius,
            ),
            text: numeral_label(tick_degrees),
            font_size: config.numeral_font_size,
            color: tone,
        });
    }

    let angles = state.hand_angles();

    scene.add_command(DrawCommand::Save);
    scene.add_command(DrawCommand::Rotate {
        degrees: angles.second as f64,
        pivot: center,
    });
    scene.add_command(DrawCommand::Line {
        from: center,
        to: (c, c + geometry.second_hand_length()),
        thickness: geometry.second_hand_stroke_width,
        color: palette.accent,
    });
    scene.add_command(DrawCommand::Restore);

    scene.add_command(DrawCommand::Save);
    scene.add_command(DrawCommand::Rotate {
        degrees: angles.minute as f64,
        pivot: center,
    });
    scene.add_command(DrawCommand::FillPolygon {
        points: hand_outline(c, geometry.minute_hand_length, geometry),
        color: palette.dark,
    });
    scene.add_command(DrawCommand::Restore);

    scene.add_command(DrawCommand::Save);
    scene.add_command(DrawCommand::Rotate {
        degrees: angles.hour as f64,
        pivot: center,
    });
    scene.add_command(DrawCommand::FillPolygon {
        points: hand_outline(c, geometry.hour_hand_length, geometry),
        color: palette.hour_hand,
    });
    scene.add_command(DrawCommand::Restore);

    scene.add_command(DrawCommand::Restore);
    scene
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Color;

    fn face_at(elapsed: u64) -> Scene {
        build_face_scene(
            &ClockState::starting_at(elapsed),
            &ClockConfig::default(),
            600,
            600,
        )
    }

    fn texts(scene: &Scene) -> Vec<(String, (f64, f64), Color)> {
        scene
            .commands()
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text {
                    text,
                    anchor,
                    color,
                    ..
                } => Some((text.clone(), *anchor, *color)),
                _ => None,
            })
            .collect()
    }

    fn rotations(scene: &Scene) -> Vec<f64> {
        scene
            .commands()
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Rotate { degrees, .. } => Some(*degrees),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn numerals_run_twelve_then_one_to_eleven() {
        let labels: Vec<String> = texts(&face_at(0)).into_iter().map(|t| t.0).collect();
        let expected: Vec<String> = std::iter::once("12".to_string())
            .chain((1..=11).map(|k| k.to_string()))
            .collect();
        assert_eq!(labels, expected);
    }

    #[test]
    fn numeral_labels_by_angle() {
        assert_eq!(numeral_label(0), "12");
        for k in 1..=11u16 {
            assert_eq!(numeral_label(30 * k), k.to_string());
        }
    }

    #[test]
    fn twelve_sits_on_top_and_three_on_the_right() {
        let numerals = texts(&face_at(0));
        let (_, twelve, _) = &numerals[0];
        let (_, three, _) = &numerals[3];
        assert!((twelve.0 - 300.0).abs() < 1e-6);
        assert!((twelve.1 - (300.0 - 198.0)).abs() < 1e-6);
        assert!((three.0 - (300.0 + 198.0)).abs() < 1e-6);
        assert!((three.1 - 300.0).abs() < 1e-6);
    }

    #[test]
    fn quarter_numerals_and_ticks_are_dark() {
        let scene = face_at(42);
        let palette = ClockConfig::default().palette;
        for (i, (_, _, color)) in texts(&scene).into_iter().enumerate() {
            let degrees = i as u16 * TICK_STEP_DEGREES;
            let expected = if is_quarter(degrees) {
                palette.dark
            } else {
                palette.light
            };
            assert_eq!(color, expected, "numeral at {degrees}°");
        }

        let tick_colors: Vec<Color> = scene
            .commands()
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Line {
                    color, thickness, ..
                } if *thickness == 2.0 && *color != palette.accent => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(tick_colors.len(), 12);
        for (i, color) in tick_colors.into_iter().enumerate() {
            let quarter = i % 3 == 0;
            assert_eq!(color == palette.dark, quarter, "tick {i}");
        }
    }

    #[test]
    fn hands_rotate_second_minute_hour() {
        assert_eq!(rotations(&face_at(0)), vec![180.0, 180.0, 180.0]);
        assert_eq!(rotations(&face_at(90)), vec![0.0, 186.0, 180.0]);
        assert_eq!(rotations(&face_at(3661)), vec![186.0, 186.0, 240.0]);
    }

    #[test]
    fn minute_hand_is_longer_than_hour_hand() {
        let geometry = FaceGeometry::default();
        let hour = hand_outline(300.0, geometry.hour_hand_length, &geometry);
        let minute = hand_outline(300.0, geometry.minute_hand_length, &geometry);
        assert!(minute[2].1 > hour[2].1);
        assert_eq!(hour[1], minute[1]);
        assert_eq!(hour[3], minute[3]);
        assert!((hour[2].1 - 375.0).abs() < 1e-9);
        assert!((minute[2].1 - 405.0).abs() < 1e-9);
    }

    #[test]
    fn saves_and_restores_balance() {
        let scene = face_at(12345);
        let mut depth: i32 = 0;
        for cmd in scene.commands() {
            match cmd {
                DrawCommand::Save => depth += 1,
                DrawCommand::Restore => {
                    depth -= 1;
                    assert!(depth >= 0);
                }
                _ => {}
            }
        }
        assert_eq!(depth, 0);
    }

    #[test]
    fn wide_frames_center_the_square() {
        let viewport = Viewport::square_fit(800, 600);
        assert_eq!(viewport, Viewport { x: 100.0, y: 0.0, side: 600.0 });

        let scene = build_face_scene(&ClockState::new(), &ClockConfig::default(), 800, 600);
        assert!(scene
            .commands()
            .contains(&DrawCommand::Translate { dx: 100.0, dy: 0.0 }));
    }

    #[test]
    fn same_state_same_scene() {
        let a = face_at(777);
        let b = face_at(777);
        assert_eq!(a.commands(), b.commands());
    }
}
