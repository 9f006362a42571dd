use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

use super::AffineTransform;
use crate::error::SegmentTypeError;
use crate::{Identifier, Plist};

/// A single point in a [`Contour`].
///
/// [`Contour`]: super::Contour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContourPoint {
    /// The x coordinate.
    pub x: f64,
    /// The y coordinate.
    pub y: f64,
    /// The role of the point in its contour.
    #[serde(rename = "type", default)]
    pub typ: PointType,
    /// Whether the contour is smooth (tangent continuous) at this point.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub smooth: bool,
    /// An arbitrary name for the point.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    identifier: Option<Identifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lib: Option<Plist>,
}

/// The role of a point in a contour.
///
/// The discriminant of each variant is its numeric segment-type code, which
/// is also its serialized form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum PointType {
    /// A point of this type must be the first in a contour. The reverse is not true:
    /// a contour does not necessarily start with a move point. When a contour
    /// does start with a move point, it is open.
    Move = 0,
    /// Draw a straight line from the previous point to this point.
    /// The previous point must be a move, a line, a curve or a qcurve.
    Line = 1,
    /// This point is part of a curve segment that goes up to the next point
    /// that is either a curve or a qcurve.
    #[default]
    OffCurve = 2,
    /// Draw a cubic bezier curve from the last non-offcurve point to this point.
    /// It may be preceded by zero, one or two offcurve points.
    Curve = 3,
    /// Similar to curve, but uses quadratic curves, using the TrueType
    /// "implied on-curve points" principle.
    QCurve = 4,
}

impl ContourPoint {
    /// Create a new point.
    pub fn new(
        x: f64,
        y: f64,
        typ: PointType,
        smooth: bool,
        name: Option<String>,
        identifier: Option<Identifier>,
        lib: Option<Plist>,
    ) -> Self {
        let mut this = Self { x, y, typ, smooth, name, identifier, lib: None };
        if let Some(lib) = lib {
            this.replace_lib(lib);
        }
        this
    }

    /// A plain point at `(x, y)` with the given role.
    pub fn at(x: f64, y: f64, typ: PointType) -> Self {
        ContourPoint::new(x, y, typ, false, None, None, None)
    }

    /// Returns `true` if this is anything but an off-curve point.
    pub fn is_on_curve(&self) -> bool {
        self.typ != PointType::OffCurve
    }

    /// Apply the transform to this point's position.
    pub fn transform(&mut self, transform: AffineTransform) {
        let (x, y) = transform.apply((self.x, self.y));
        self.x = x;
        self.y = y;
    }

    /// The position as an `(x, y)` tuple.
    pub fn pos(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    #[cfg(feature = "kurbo")]
    pub(crate) fn to_kurbo(&self) -> kurbo::Point {
        kurbo::Point::new(self.x, self.y)
    }
}

impl_object_lib!(ContourPoint, "point");

impl PointType {
    /// The numeric segment-type code of this role.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// The role with the given numeric segment-type code.
    pub fn from_code(code: u8) -> Result<PointType, SegmentTypeError> {
        match code {
            0 => Ok(PointType::Move),
            1 => Ok(PointType::Line),
            2 => Ok(PointType::OffCurve),
            3 => Ok(PointType::Curve),
            4 => Ok(PointType::QCurve),
            other => Err(SegmentTypeError::UnknownCode(other)),
        }
    }

    /// The role for a symbolic segment type, as used by point pens.
    ///
    /// `None` is an off-curve point.
    pub fn from_segment_type(segment_type: Option<&str>) -> Result<PointType, SegmentTypeError> {
        match segment_type {
            None => Ok(PointType::OffCurve),
            Some("move") => Ok(PointType::Move),
            Some("line") => Ok(PointType::Line),
            Some("curve") => Ok(PointType::Curve),
            Some("qcurve") => Ok(PointType::QCurve),
            Some(other) => Err(SegmentTypeError::UnknownName(other.to_owned())),
        }
    }

    /// The symbolic segment type of this role, or `None` for off-curve points.
    pub fn segment_type(self) -> Option<&'static str> {
        match self {
            PointType::Move => Some("move"),
            PointType::Line => Some("line"),
            PointType::OffCurve => None,
            PointType::Curve => Some("curve"),
            PointType::QCurve => Some("qcurve"),
        }
    }
}

impl FromStr for PointType {
    type Err = SegmentTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "offcurve" => Ok(PointType::OffCurve),
            other => PointType::from_segment_type(Some(other)),
        }
    }
}

impl fmt::Display for PointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment_type().unwrap_or("offcurve"))
    }
}

/// Encode a symbolic segment type (`"move"`, `"line"`, `"curve"`, `"qcurve"`
/// or `None` for an off-curve point) as its numeric code.
///
/// ```
/// assert_eq!(fontdoc::encode_segment_type(Some("curve")), Ok(3));
/// assert_eq!(fontdoc::encode_segment_type(None), Ok(2));
/// assert!(fontdoc::encode_segment_type(Some("arc")).is_err());
/// ```
pub fn encode_segment_type(segment_type: Option<&str>) -> Result<u8, SegmentTypeError> {
    PointType::from_segment_type(segment_type).map(PointType::code)
}

/// Decode a numeric segment-type code back to its symbolic form.
pub fn decode_segment_type(code: u8) -> Result<Option<&'static str>, SegmentTypeError> {
    PointType::from_code(code).map(PointType::segment_type)
}
