//! Conversion between point pens and segment pens.

use super::builder::check_point_types;
use super::{Pen, PointPen};
use crate::error::PenError;
use crate::{AffineTransform, Identifier, Name, PointType};

/// A [`PointPen`] that turns each contour into segments and sends them on to
/// a [`Pen`].
///
/// A contour that starts with a move point is open: it is drawn from that
/// point and finished with `end_path`. Any other contour is closed. It is
/// drawn from its first on-curve point, rotated so that point comes last,
/// and finished with `close_path`. The line segment that would return to the
/// start is implied by the close and is only drawn when it has zero length.
/// A closed contour made only of off-curve points becomes a single
/// `qcurve_to` with no end point.
///
/// Point names, identifiers and smoothness do not survive the conversion.
#[derive(Debug)]
pub struct PointToSegmentPen<P> {
    pen: P,
    current: Option<Vec<((f64, f64), PointType)>>,
}

/// A [`Pen`] that turns segments back into points and sends them on to a
/// [`PointPen`].
///
/// Each contour is buffered until `close_path` or `end_path`. When a closed
/// contour ends on the point it started from, the two points are merged.
#[derive(Debug)]
pub struct SegmentToPointPen<P> {
    pen: P,
    current: Option<Vec<((f64, f64), PointType)>>,
}

enum Segment {
    Line((f64, f64)),
    Curve(Vec<(f64, f64)>, (f64, f64)),
    QCurve(Vec<(f64, f64)>, (f64, f64)),
}

impl Segment {
    fn end(&self) -> (f64, f64) {
        match self {
            Segment::Line(end) | Segment::Curve(_, end) | Segment::QCurve(_, end) => *end,
        }
    }
}

impl<P: Pen> PointToSegmentPen<P> {
    /// Wrap a segment pen.
    pub fn new(pen: P) -> Self {
        PointToSegmentPen { pen, current: None }
    }

    /// Return the wrapped pen.
    pub fn into_inner(self) -> P {
        self.pen
    }

    fn flush(&mut self, points: Vec<((f64, f64), PointType)>) -> Result<(), PenError> {
        let Some(&(first, first_type)) = points.first() else {
            return Ok(());
        };
        if points.len() == 1 {
            self.pen.move_to(first)?;
            return self.pen.end_path();
        }

        let closed = first_type != PointType::Move;
        let points = if closed {
            match points.iter().position(|(_, typ)| *typ != PointType::OffCurve) {
                Some(idx) => {
                    let mut rotated = points[idx + 1..].to_vec();
                    rotated.extend_from_slice(&points[..=idx]);
                    rotated
                }
                None => {
                    let off_curves: Vec<_> = points.iter().map(|(pt, _)| *pt).collect();
                    self.pen.qcurve_to(&off_curves, None)?;
                    return self.pen.close_path();
                }
            }
        } else {
            points[1..].to_vec()
        };

        // collect every segment before drawing, so a bad contour draws nothing
        let mut segments = Vec::new();
        let mut pending = Vec::new();
        for (pt, typ) in points {
            let segment = match typ {
                PointType::OffCurve => {
                    pending.push(pt);
                    continue;
                }
                PointType::Move => return Err(PenError::UnexpectedMove),
                PointType::Line if !pending.is_empty() => {
                    return Err(PenError::UnexpectedPointAfterOffCurve)
                }
                PointType::Line => Segment::Line(pt),
                PointType::Curve => Segment::Curve(std::mem::take(&mut pending), pt),
                PointType::QCurve => Segment::QCurve(std::mem::take(&mut pending), pt),
            };
            segments.push(segment);
        }
        if !pending.is_empty() {
            return Err(PenError::TrailingOffCurves);
        }

        // for closed contours, the end of the last segment is the start
        let start = match (closed, segments.last()) {
            (true, Some(segment)) => segment.end(),
            _ => first,
        };
        self.pen.move_to(start)?;
        let mut last = start;
        let n_segments = segments.len();
        for (i, segment) in segments.into_iter().enumerate() {
            let end = segment.end();
            match segment {
                Segment::Line(end) => {
                    let implied_close = closed && i + 1 == n_segments;
                    if !implied_close || end == last {
                        self.pen.line_to(end)?;
                    }
                }
                Segment::Curve(off_curves, end) => self.pen.curve_to(&off_curves, end)?,
                Segment::QCurve(off_curves, end) => self.pen.qcurve_to(&off_curves, Some(end))?,
            }
            last = end;
        }
        if closed {
            self.pen.close_path()
        } else {
            self.pen.end_path()
        }
    }
}

impl<P: Pen> PointPen for PointToSegmentPen<P> {
    fn begin_path(&mut self, _identifier: Option<Identifier>) -> Result<(), PenError> {
        if self.current.is_some() {
            return Err(PenError::UnfinishedDrawing);
        }
        self.current = Some(Vec::new());
        Ok(())
    }

    fn add_point(
        &mut self,
        pt: (f64, f64),
        typ: PointType,
        _smooth: bool,
        _name: Option<String>,
        _identifier: Option<Identifier>,
    ) -> Result<(), PenError> {
        self.current.as_mut().ok_or(PenError::PathNotStarted)?.push((pt, typ));
        Ok(())
    }

    fn end_path(&mut self) -> Result<(), PenError> {
        let points = self.current.take().ok_or(PenError::PathNotStarted)?;
        self.flush(points)
    }

    fn add_component(
        &mut self,
        base: Name,
        transform: AffineTransform,
        _identifier: Option<Identifier>,
    ) -> Result<(), PenError> {
        if self.current.is_some() {
            return Err(PenError::UnfinishedDrawing);
        }
        self.pen.add_component(base, transform)
    }
}

impl<P: PointPen> SegmentToPointPen<P> {
    /// Wrap a point pen.
    pub fn new(pen: P) -> Self {
        SegmentToPointPen { pen, current: None }
    }

    /// Return the wrapped pen.
    pub fn into_inner(self) -> P {
        self.pen
    }

    fn contour(&mut self) -> Result<&mut Vec<((f64, f64), PointType)>, PenError> {
        self.current.as_mut().ok_or(PenError::PathNotStarted)
    }

    fn flush(&mut self, points: Vec<((f64, f64), PointType)>) -> Result<(), PenError> {
        // a path begun on the wrapped pen cannot be abandoned, so check first
        let types: Vec<_> = points.iter().map(|(_, typ)| *typ).collect();
        check_point_types(&types)?;
        self.pen.begin_path(None)?;
        for (pt, typ) in points {
            self.pen.add_point(pt, typ, false, None, None)?;
        }
        self.pen.end_path()
    }
}

impl<P: PointPen> Pen for SegmentToPointPen<P> {
    fn move_to(&mut self, pt: (f64, f64)) -> Result<(), PenError> {
        if self.current.is_some() {
            return Err(PenError::UnfinishedDrawing);
        }
        self.current = Some(vec![(pt, PointType::Move)]);
        Ok(())
    }

    fn line_to(&mut self, pt: (f64, f64)) -> Result<(), PenError> {
        self.contour()?.push((pt, PointType::Line));
        Ok(())
    }

    fn curve_to(&mut self, off_curves: &[(f64, f64)], end: (f64, f64)) -> Result<(), PenError> {
        let contour = self.contour()?;
        contour.extend(off_curves.iter().map(|pt| (*pt, PointType::OffCurve)));
        contour.push((end, PointType::Curve));
        Ok(())
    }

    fn qcurve_to(
        &mut self,
        off_curves: &[(f64, f64)],
        end: Option<(f64, f64)>,
    ) -> Result<(), PenError> {
        let contour = match end {
            Some(_) => self.contour()?,
            None if off_curves.is_empty() => return Err(PenError::MissingPoints),
            None if self.current.is_some() => return Err(PenError::UnfinishedDrawing),
            None => self.current.insert(Vec::new()),
        };
        contour.extend(off_curves.iter().map(|pt| (*pt, PointType::OffCurve)));
        if let Some(end) = end {
            contour.push((end, PointType::QCurve));
        }
        Ok(())
    }

    fn close_path(&mut self) -> Result<(), PenError> {
        let mut points = self.current.take().ok_or(PenError::PathNotStarted)?;
        let duplicate_start =
            points.len() > 1 && points.first().map(|p| p.0) == points.last().map(|p| p.0);
        if duplicate_start {
            if let Some(last) = points.pop() {
                points[0] = last;
            }
        } else if let Some(first) = points.first_mut() {
            // the closing line is implied, so the start is a plain on-curve
            if first.1 == PointType::Move {
                first.1 = PointType::Line;
            }
        }
        self.flush(points)
    }

    fn end_path(&mut self) -> Result<(), PenError> {
        let points = self.current.take().ok_or(PenError::PathNotStarted)?;
        self.flush(points)
    }

    fn add_component(&mut self, base: Name, transform: AffineTransform) -> Result<(), PenError> {
        if self.current.is_some() {
            return Err(PenError::UnfinishedDrawing);
        }
        self.pen.add_component(base, transform, None)
    }
}
