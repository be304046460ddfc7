/// Color representation for clock face elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(0xff, 0xff, 0xff);
    pub const LIGHT_GRAY: Color = Color::new(0xcc, 0xcc, 0xcc);
    pub const DARK_GRAY: Color = Color::new(0x44, 0x44, 0x44);
    pub const BLACK: Color = Color::new(0x00, 0x00, 0x00);
    pub const RED: Color = Color::new(0xff, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn as_tuple(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

/// Two-tone palette plus the second-hand accent.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub background: Color,
    /// Dial ring, minor ticks and minor numerals.
    pub light: Color,
    /// Quarter ticks, quarter numerals and the minute hand.
    pub dark: Color,
    pub hour_hand: Color,
    pub accent: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            light: Color::LIGHT_GRAY,
            dark: Color::DARK_GRAY,
            hour_hand: Color::BLACK,
            accent: Color::RED,
        }
    }
}

/// Fixed dial geometry.
///
/// Radii in pixels, `*_factor` fields relative to the dial radius, hand
/// fields relative to the canvas half-extent.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceGeometry {
    pub dial_radius: f64,
    pub dial_stroke_width: f32,
    pub tick_outer_factor: f64,
    pub tick_inner_factor: f64,
    pub tick_stroke_width: f32,
    /// Numerals sit at this fraction of the inner tick radius.
    pub numeral_radius_factor: f64,
    pub hour_hand_length: f64,
    pub minute_hand_length: f64,
    /// Half-width of both hand shapes, also the distance of the widest point
    /// from the center.
    pub hand_shoulder: f64,
    pub second_hand_length_factor: f64,
    pub second_hand_stroke_width: f32,
}

impl Default for FaceGeometry {
    fn default() -> Self {
        Self {
            dial_radius: 275.0,
            dial_stroke_width: 10.0,
            tick_outer_factor: 0.92,
            tick_inner_factor: 0.8,
            tick_stroke_width: 2.0,
            numeral_radius_factor: 0.9,
            hour_hand_length: 0.25,
            minute_hand_length: 0.35,
            hand_shoulder: 0.023,
            second_hand_length_factor: 0.8,
            second_hand_stroke_width: 2.0,
        }
    }
}

impl FaceGeometry {
    pub fn tick_outer_radius(&self) -> f64 {
        self.dial_radius * self.tick_outer_factor
    }

    pub fn tick_inner_radius(&self) -> f64 {
        self.dial_radius * self.tick_inner_factor
    }

    pub fn numeral_radius(&self) -> f64 {
        self.tick_inner_radius() * self.numeral_radius_factor
    }

    pub fn second_hand_length(&self) -> f64 {
        self.dial_radius * self.second_hand_length_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_radii_follow_factors() {
        let geometry = FaceGeometry::default();
        assert!((geometry.tick_outer_radius() - 253.0).abs() < 1e-9);
        assert!((geometry.tick_inner_radius() - 220.0).abs() < 1e-9);
        assert!((geometry.numeral_radius() - 198.0).abs() < 1e-9);
        assert!((geometry.second_hand_length() - 220.0).abs() < 1e-9);
        assert!(geometry.minute_hand_length > geometry.hour_hand_length);
    }

    #[test]
    fn palette_is_two_tone_with_accent() {
        let palette = Palette::default();
        assert_eq!(palette.light, Color::LIGHT_GRAY);
        assert_eq!(palette.dark, Color::DARK_GRAY);
        assert_eq!(palette.accent.as_tuple(), (0xff, 0x00, 0x00));
    }
}
