use serde::{Deserialize, Serialize};

/// An affine transformation, as used to place a [`Component`].
///
/// Taken together in order, the fields are the six coefficients
/// `(xx, xy, yx, yy, dx, dy)` of the matrix. This is also the order used by
/// the array conversions and by serialization.
///
/// [`Component`]: super::Component
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 6]", into = "[f64; 6]")]
pub struct AffineTransform {
    /// x-scale value.
    pub x_scale: f64,
    /// xy-scale value.
    pub xy_scale: f64,
    /// yx-scale value.
    pub yx_scale: f64,
    /// y-scale value.
    pub y_scale: f64,
    /// x-offset value.
    pub x_offset: f64,
    /// y-offset value.
    pub y_offset: f64,
}

impl AffineTransform {
    /// `[1 0 0 1 0 0]`; the identity transformation.
    pub fn identity() -> Self {
        AffineTransform {
            x_scale: 1.0,
            xy_scale: 0.,
            yx_scale: 0.,
            y_scale: 1.0,
            x_offset: 0.,
            y_offset: 0.,
        }
    }

    /// A transformation that only moves, by `(dx, dy)`.
    pub fn translate(dx: f64, dy: f64) -> Self {
        AffineTransform { x_offset: dx, y_offset: dy, ..Self::identity() }
    }

    /// Returns `true` if this is the identity transformation.
    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// Map a point through this transformation.
    pub fn apply(&self, (x, y): (f64, f64)) -> (f64, f64) {
        (
            self.x_scale * x + self.yx_scale * y + self.x_offset,
            self.xy_scale * x + self.y_scale * y + self.y_offset,
        )
    }

    /// The six coefficients, in `(xx, xy, yx, yy, dx, dy)` order.
    pub fn to_array(self) -> [f64; 6] {
        [self.x_scale, self.xy_scale, self.yx_scale, self.y_scale, self.x_offset, self.y_offset]
    }
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<[f64; 6]> for AffineTransform {
    fn from([x_scale, xy_scale, yx_scale, y_scale, x_offset, y_offset]: [f64; 6]) -> Self {
        AffineTransform { x_scale, xy_scale, yx_scale, y_scale, x_offset, y_offset }
    }
}

impl From<AffineTransform> for [f64; 6] {
    fn from(src: AffineTransform) -> [f64; 6] {
        src.to_array()
    }
}

#[cfg(feature = "kurbo")]
impl From<AffineTransform> for kurbo::Affine {
    fn from(src: AffineTransform) -> kurbo::Affine {
        kurbo::Affine::new(src.to_array())
    }
}

#[cfg(feature = "kurbo")]
impl From<kurbo::Affine> for AffineTransform {
    fn from(src: kurbo::Affine) -> AffineTransform {
        src.as_coeffs().into()
    }
}
