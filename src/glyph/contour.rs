use serde::{Deserialize, Serialize};

use super::{ContourPoint, PointType};
use crate::error::PenError;
use crate::pen::PointPen;
use crate::{Identifier, Plist};

/// A single open or closed bezier path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contour {
    /// The points, in drawing order.
    pub points: Vec<ContourPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    identifier: Option<Identifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lib: Option<Plist>,
}

impl Contour {
    /// Create a new contour.
    pub fn new(points: Vec<ContourPoint>, identifier: Option<Identifier>, lib: Option<Plist>) -> Self {
        let mut this = Self { points, identifier, lib: None };
        if let Some(lib) = lib {
            this.replace_lib(lib);
        }
        this
    }

    /// Returns `true` if the contour is closed.
    ///
    /// A contour is open if and only if its first point is a move.
    pub fn is_closed(&self) -> bool {
        self.points.first().map_or(true, |v| v.typ != PointType::Move)
    }

    /// The number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the contour has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Send this contour's points to a [`PointPen`], as a single path.
    pub fn draw_points(&self, pen: &mut impl PointPen) -> Result<(), PenError> {
        pen.begin_path(self.identifier.clone())?;
        for point in &self.points {
            pen.add_point(
                point.pos(),
                point.typ,
                point.smooth,
                point.name.clone(),
                point.identifier().cloned(),
            )?;
        }
        pen.end_path()
    }

    /// Converts the contour to a [`kurbo::BezPath`].
    #[cfg(feature = "kurbo")]
    pub fn to_kurbo(&self) -> Result<kurbo::BezPath, PenError> {
        let mut path = kurbo::BezPath::new();
        let mut pen = crate::pen::PointToSegmentPen::new(&mut path);
        self.draw_points(&mut pen)?;
        Ok(path)
    }
}

impl_object_lib!(Contour, "contour");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_and_closed() {
        assert!(Contour::default().is_closed());

        let open = Contour::new(
            vec![ContourPoint::at(0., 0., PointType::Move), ContourPoint::at(10., 0., PointType::Line)],
            None,
            None,
        );
        assert!(!open.is_closed());
        assert_eq!(open.len(), 2);

        let closed = Contour::new(
            vec![ContourPoint::at(0., 0., PointType::Line), ContourPoint::at(10., 0., PointType::Line)],
            None,
            None,
        );
        assert!(closed.is_closed());
    }

    #[test]
    #[cfg(feature = "kurbo")]
    fn to_kurbo_closed_curve() {
        use kurbo::{PathEl, Point};

        let contour = Contour::new(
            vec![
                ContourPoint::at(0., 0., PointType::Line),
                ContourPoint::at(0., 50., PointType::OffCurve),
                ContourPoint::at(50., 100., PointType::OffCurve),
                ContourPoint::at(100., 100., PointType::Curve),
            ],
            None,
            None,
        );
        let path = contour.to_kurbo().unwrap();
        assert_eq!(
            path.elements(),
            &[
                PathEl::MoveTo(Point::new(0., 0.)),
                PathEl::CurveTo(Point::new(0., 50.), Point::new(50., 100.), Point::new(100., 100.)),
                PathEl::ClosePath,
            ]
        );
    }
}
