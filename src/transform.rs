// ============================================================================
// 2D AFFINE TRANSFORMS
// ============================================================================

/// Affine transform in screen space (y grows downwards).
///
/// Maps `(x, y)` to `(a * x + c * y + e, b * x + d * y + f)`. Only
/// translations and rotations are ever composed here, so lengths and stroke
/// widths survive a transform unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub const fn identity() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }

    pub const fn translation(dx: f64, dy: f64) -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: dx,
            f: dy,
        }
    }

    /// Rotation about the origin. Positive degrees turn clockwise on screen.
    pub fn rotation(degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            e: 0.0,
            f: 0.0,
        }
    }

    /// Rotation about `pivot`: translate to the pivot, rotate, translate back.
    pub fn rotation_about(degrees: f64, pivot: (f64, f64)) -> Self {
        Self::translation(pivot.0, pivot.1)
            .then_apply(&Self::rotation(degrees))
            .then_apply(&Self::translation(-pivot.0, -pivot.1))
    }

    /// Returns `self ∘ inner`: points go through `inner` first, then `self`.
    ///
    /// This is how a drawing context accumulates nested `translate`/`rotate`
    /// calls: each new operation applies in the local frame of the previous.
    pub fn then_apply(&self, inner: &Transform) -> Transform {
        Transform {
            a: self.a * inner.a + self.c * inner.b,
            b: self.b * inner.a + self.d * inner.b,
            c: self.a * inner.c + self.c * inner.d,
            d: self.b * inner.c + self.d * inner.d,
            e: self.a * inner.e + self.c * inner.f + self.e,
            f: self.b * inner.e + self.d * inner.f + self.f,
        }
    }

    pub fn apply(&self, point: (f64, f64)) -> (f64, f64) {
        let (x, y) = point;
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }
}
