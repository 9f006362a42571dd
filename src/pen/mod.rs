//! Streaming outlines into and out of glyphs.
//!
//! Outlines travel in one of two shapes:
//!
//! - as a stream of points, through a [`PointPen`]: each contour is opened
//!   with `begin_path`, filled with `add_point` and committed with
//!   `end_path`. Each point carries its [`PointType`], so the stream maps
//!   one to one onto a [`Contour`].
//! - as a stream of segments, through a [`Pen`]: `move_to`, `line_to`,
//!   `curve_to`, `qcurve_to` and `close_path`/`end_path`.
//!
//! [`PointToSegmentPen`] and [`SegmentToPointPen`] convert between the two.
//! [`GlyphPointPen`] is a point pen that draws into a [`Glyph`].
//!
//! These follow the conventions of the [fontTools pen protocol].
//!
//! [`Contour`]: crate::Contour
//! [`Glyph`]: crate::Glyph
//! [fontTools pen protocol]: https://fonttools.readthedocs.io/en/latest/pens/basePen.html

mod builder;
mod convert;
mod recording;

pub use builder::GlyphPointPen;
pub use convert::{PointToSegmentPen, SegmentToPointPen};
pub use recording::{PenCommand, PointPenCommand, RecordingPen, RecordingPointPen};

use crate::error::PenError;
use crate::{AffineTransform, Identifier, Name, PointType};

/// A consumer of outlines as a stream of points.
pub trait PointPen {
    /// Start a new contour.
    fn begin_path(&mut self, identifier: Option<Identifier>) -> Result<(), PenError>;

    /// Add a point to the current contour.
    fn add_point(
        &mut self,
        pt: (f64, f64),
        typ: PointType,
        smooth: bool,
        name: Option<String>,
        identifier: Option<Identifier>,
    ) -> Result<(), PenError>;

    /// Finish the current contour.
    fn end_path(&mut self) -> Result<(), PenError>;

    /// Add a reference to another glyph.
    fn add_component(
        &mut self,
        base: Name,
        transform: AffineTransform,
        identifier: Option<Identifier>,
    ) -> Result<(), PenError>;
}

/// A consumer of outlines as a stream of segments.
pub trait Pen {
    /// Start a new contour at `pt`.
    fn move_to(&mut self, pt: (f64, f64)) -> Result<(), PenError>;

    /// Draw a straight line to `pt`.
    fn line_to(&mut self, pt: (f64, f64)) -> Result<(), PenError>;

    /// Draw a curve to `end`.
    ///
    /// With two off-curve points this is a cubic bezier, with one a
    /// quadratic and with none a straight line. More than two describe a
    /// "superbezier", which pens may reject.
    fn curve_to(&mut self, off_curves: &[(f64, f64)], end: (f64, f64)) -> Result<(), PenError>;

    /// Draw a run of quadratic curves to `end`, with on-curve points implied
    /// halfway between consecutive off-curve points.
    ///
    /// When `end` is `None` the contour has no on-curve points at all; this
    /// call then stands in for `move_to` and is followed by `close_path`.
    fn qcurve_to(
        &mut self,
        off_curves: &[(f64, f64)],
        end: Option<(f64, f64)>,
    ) -> Result<(), PenError>;

    /// Close the current contour.
    fn close_path(&mut self) -> Result<(), PenError>;

    /// End the current contour without closing it.
    fn end_path(&mut self) -> Result<(), PenError>;

    /// Add a reference to another glyph.
    fn add_component(&mut self, base: Name, transform: AffineTransform) -> Result<(), PenError>;
}

impl<P: PointPen + ?Sized> PointPen for &mut P {
    fn begin_path(&mut self, identifier: Option<Identifier>) -> Result<(), PenError> {
        (**self).begin_path(identifier)
    }

    fn add_point(
        &mut self,
        pt: (f64, f64),
        typ: PointType,
        smooth: bool,
        name: Option<String>,
        identifier: Option<Identifier>,
    ) -> Result<(), PenError> {
        (**self).add_point(pt, typ, smooth, name, identifier)
    }

    fn end_path(&mut self) -> Result<(), PenError> {
        (**self).end_path()
    }

    fn add_component(
        &mut self,
        base: Name,
        transform: AffineTransform,
        identifier: Option<Identifier>,
    ) -> Result<(), PenError> {
        (**self).add_component(base, transform, identifier)
    }
}

impl<P: Pen + ?Sized> Pen for &mut P {
    fn move_to(&mut self, pt: (f64, f64)) -> Result<(), PenError> {
        (**self).move_to(pt)
    }

    fn line_to(&mut self, pt: (f64, f64)) -> Result<(), PenError> {
        (**self).line_to(pt)
    }

    fn curve_to(&mut self, off_curves: &[(f64, f64)], end: (f64, f64)) -> Result<(), PenError> {
        (**self).curve_to(off_curves, end)
    }

    fn qcurve_to(
        &mut self,
        off_curves: &[(f64, f64)],
        end: Option<(f64, f64)>,
    ) -> Result<(), PenError> {
        (**self).qcurve_to(off_curves, end)
    }

    fn close_path(&mut self) -> Result<(), PenError> {
        (**self).close_path()
    }

    fn end_path(&mut self) -> Result<(), PenError> {
        (**self).end_path()
    }

    fn add_component(&mut self, base: Name, transform: AffineTransform) -> Result<(), PenError> {
        (**self).add_component(base, transform)
    }
}

#[cfg(feature = "kurbo")]
fn midpoint(a: (f64, f64), b: (f64, f64)) -> (f64, f64) {
    ((a.0 + b.0) / 2.0, (a.1 + b.1) / 2.0)
}

/// Draws outlines into a [`kurbo::BezPath`].
///
/// Components carry no geometry of their own and are ignored.
#[cfg(feature = "kurbo")]
impl Pen for kurbo::BezPath {
    fn move_to(&mut self, (x, y): (f64, f64)) -> Result<(), PenError> {
        kurbo::BezPath::move_to(self, (x, y));
        Ok(())
    }

    fn line_to(&mut self, (x, y): (f64, f64)) -> Result<(), PenError> {
        kurbo::BezPath::line_to(self, (x, y));
        Ok(())
    }

    fn curve_to(&mut self, off_curves: &[(f64, f64)], end: (f64, f64)) -> Result<(), PenError> {
        match off_curves {
            [] => kurbo::BezPath::line_to(self, end),
            [p1] => kurbo::BezPath::quad_to(self, *p1, end),
            [p1, p2] => kurbo::BezPath::curve_to(self, *p1, *p2, end),
            _ => return Err(PenError::TooManyOffCurves),
        }
        Ok(())
    }

    fn qcurve_to(
        &mut self,
        off_curves: &[(f64, f64)],
        end: Option<(f64, f64)>,
    ) -> Result<(), PenError> {
        let end = match (end, off_curves) {
            (Some(end), _) => end,
            (None, []) => return Err(PenError::MissingPoints),
            (None, [.., last]) => {
                let start = midpoint(*last, off_curves[0]);
                kurbo::BezPath::move_to(self, start);
                start
            }
        };
        if off_curves.is_empty() {
            kurbo::BezPath::line_to(self, end);
        }
        for (i, off) in off_curves.iter().enumerate() {
            let on = match off_curves.get(i + 1) {
                Some(next) => midpoint(*off, *next),
                None => end,
            };
            kurbo::BezPath::quad_to(self, *off, on);
        }
        Ok(())
    }

    fn close_path(&mut self) -> Result<(), PenError> {
        kurbo::BezPath::close_path(self);
        Ok(())
    }

    fn end_path(&mut self) -> Result<(), PenError> {
        Ok(())
    }

    fn add_component(&mut self, _base: Name, _transform: AffineTransform) -> Result<(), PenError> {
        Ok(())
    }
}

#[cfg(all(test, feature = "kurbo"))]
mod tests {
    use kurbo::{BezPath, PathEl, Point};

    use super::*;

    #[test]
    fn implied_on_curves() {
        let mut path = BezPath::new();
        Pen::qcurve_to(&mut path, &[(0., 0.), (100., 0.), (100., 100.), (0., 100.)], None).unwrap();
        Pen::close_path(&mut path).unwrap();
        assert_eq!(
            path.elements(),
            &[
                PathEl::MoveTo(Point::new(0., 50.)),
                PathEl::QuadTo(Point::new(0., 0.), Point::new(50., 0.)),
                PathEl::QuadTo(Point::new(100., 0.), Point::new(100., 50.)),
                PathEl::QuadTo(Point::new(100., 100.), Point::new(50., 100.)),
                PathEl::QuadTo(Point::new(0., 100.), Point::new(0., 50.)),
                PathEl::ClosePath,
            ]
        );
    }

    #[test]
    fn superbezier_rejected() {
        let mut path = BezPath::new();
        Pen::move_to(&mut path, (0., 0.)).unwrap();
        let err = Pen::curve_to(&mut path, &[(1., 1.), (2., 2.), (3., 3.)], (4., 4.));
        assert_eq!(err, Err(PenError::TooManyOffCurves));
    }
}
