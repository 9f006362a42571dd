//! A point pen that draws into a glyph.

use super::PointPen;
use crate::error::PenError;
use crate::{AffineTransform, Component, Contour, ContourPoint, Glyph, Identifier, Name, PointType};

/// A [`PointPen`] that appends contours and components to a [`Glyph`].
///
/// Each contour is checked as its points arrive and is added to the glyph
/// when [`end_path`] is called. A contour that is never ended is never
/// added; dropping the pen with a path still open discards it and logs a
/// warning.
///
/// Created with [`Glyph::point_pen`].
///
/// [`end_path`]: PointPen::end_path
#[derive(Debug)]
pub struct GlyphPointPen<'a> {
    glyph: &'a mut Glyph,
    state: DrawState,
}

#[derive(Debug, Default)]
enum DrawState {
    #[default]
    Idle,
    Drawing { scratch: Contour, number_of_offcurves: u32 },
}

impl<'a> GlyphPointPen<'a> {
    pub(crate) fn new(glyph: &'a mut Glyph) -> Self {
        GlyphPointPen { glyph, state: DrawState::Idle }
    }

    /// Returns `true` if a path has been begun and not yet ended.
    pub fn is_drawing(&self) -> bool {
        matches!(self.state, DrawState::Drawing { .. })
    }

    /// Add a point whose role is given in symbolic form: `"move"`, `"line"`,
    /// `"curve"`, `"qcurve"`, or `None` for an off-curve point.
    ///
    /// Errors on an unknown segment type, without adding anything.
    pub fn add_point_with_segment_type(
        &mut self,
        pt: (f64, f64),
        segment_type: Option<&str>,
        smooth: bool,
        name: Option<String>,
        identifier: Option<Identifier>,
    ) -> Result<(), PenError> {
        let typ = PointType::from_segment_type(segment_type)?;
        self.add_point(pt, typ, smooth, name, identifier)
    }

    /// Stop drawing.
    ///
    /// Errors if a path was begun and not ended; that path is discarded.
    pub fn finish(mut self) -> Result<(), PenError> {
        match std::mem::take(&mut self.state) {
            DrawState::Idle => Ok(()),
            DrawState::Drawing { .. } => Err(PenError::UnfinishedDrawing),
        }
    }
}

impl PointPen for GlyphPointPen<'_> {
    /// Begin a new contour.
    ///
    /// Errors if a path is already open. The open path is kept, and drawing
    /// can continue.
    fn begin_path(&mut self, identifier: Option<Identifier>) -> Result<(), PenError> {
        match self.state {
            DrawState::Idle => {
                self.state = DrawState::Drawing {
                    scratch: Contour::new(Vec::new(), identifier, None),
                    number_of_offcurves: 0,
                };
                Ok(())
            }
            DrawState::Drawing { .. } => Err(PenError::UnfinishedDrawing),
        }
    }

    /// Add a point to the open contour.
    ///
    /// Errors when no path is open, when an off-curve point is marked
    /// smooth, or when the point cannot follow the ones before it. Nothing
    /// is added on error and a corrected point may be sent instead.
    fn add_point(
        &mut self,
        (x, y): (f64, f64),
        typ: PointType,
        smooth: bool,
        name: Option<String>,
        identifier: Option<Identifier>,
    ) -> Result<(), PenError> {
        let DrawState::Drawing { scratch, number_of_offcurves } = &mut self.state else {
            return Err(PenError::PathNotStarted);
        };
        match typ {
            PointType::Move if !scratch.points.is_empty() => return Err(PenError::UnexpectedMove),
            PointType::Move => (),
            PointType::Line if *number_of_offcurves > 0 => {
                return Err(PenError::UnexpectedPointAfterOffCurve)
            }
            PointType::Line => (),
            PointType::OffCurve if smooth => return Err(PenError::UnexpectedSmooth),
            PointType::OffCurve => *number_of_offcurves = number_of_offcurves.saturating_add(1),
            PointType::Curve if *number_of_offcurves > 2 => return Err(PenError::TooManyOffCurves),
            PointType::Curve | PointType::QCurve => *number_of_offcurves = 0,
        }
        scratch.points.push(ContourPoint::new(x, y, typ, smooth, name, identifier, None));
        Ok(())
    }

    /// Commit the open contour to the glyph.
    ///
    /// Errors when no path is open, or when the contour ends in off-curve
    /// points that nothing completes. On error the contour is discarded and
    /// the glyph is left as it was.
    fn end_path(&mut self) -> Result<(), PenError> {
        let DrawState::Drawing { scratch, number_of_offcurves } = std::mem::take(&mut self.state)
        else {
            return Err(PenError::PathNotStarted);
        };
        check_closing(scratch.points.iter().map(|p| p.typ), number_of_offcurves)?;
        self.glyph.contours.push(scratch);
        Ok(())
    }

    fn add_component(
        &mut self,
        base: Name,
        transform: AffineTransform,
        identifier: Option<Identifier>,
    ) -> Result<(), PenError> {
        self.glyph.components.push(Component::new(base, transform, identifier, None));
        Ok(())
    }
}

/// Check a whole contour's point types against the rules [`GlyphPointPen`]
/// applies as points arrive and when the path ends.
pub(crate) fn check_point_types(types: &[PointType]) -> Result<(), PenError> {
    let mut number_of_offcurves = 0u32;
    for (i, typ) in types.iter().enumerate() {
        match typ {
            PointType::Move if i > 0 => return Err(PenError::UnexpectedMove),
            PointType::Move => (),
            PointType::Line if number_of_offcurves > 0 => {
                return Err(PenError::UnexpectedPointAfterOffCurve)
            }
            PointType::Line => (),
            PointType::OffCurve => number_of_offcurves = number_of_offcurves.saturating_add(1),
            PointType::Curve if number_of_offcurves > 2 => return Err(PenError::TooManyOffCurves),
            PointType::Curve | PointType::QCurve => number_of_offcurves = 0,
        }
    }
    check_closing(types.iter().copied(), number_of_offcurves)
}

/// Check the off-curve points left over at the end of a contour.
///
/// On a closed contour they lead into the first points.
fn check_closing(
    mut types: impl Iterator<Item = PointType>,
    trailing_offcurves: u32,
) -> Result<(), PenError> {
    if trailing_offcurves == 0 {
        return Ok(());
    }
    let mut count = trailing_offcurves;
    match types.next() {
        Some(PointType::Move) => return Err(PenError::TrailingOffCurves),
        Some(PointType::OffCurve) => count = count.saturating_add(1),
        // only off-curves
        None => return Ok(()),
        Some(first) => return check_segment_end(first, count),
    }
    for typ in types {
        match typ {
            PointType::OffCurve => count = count.saturating_add(1),
            other => return check_segment_end(other, count),
        }
    }
    Ok(())
}

fn check_segment_end(typ: PointType, number_of_offcurves: u32) -> Result<(), PenError> {
    match typ {
        PointType::Curve if number_of_offcurves > 2 => Err(PenError::TooManyOffCurves),
        PointType::Curve | PointType::QCurve => Ok(()),
        PointType::Line => Err(PenError::UnexpectedPointAfterOffCurve),
        PointType::Move | PointType::OffCurve => Err(PenError::UnexpectedMove),
    }
}

impl Drop for GlyphPointPen<'_> {
    fn drop(&mut self) {
        if let DrawState::Drawing { scratch, .. } = &self.state {
            log::warn!(
                "point pen for glyph {:?} dropped with an unfinished path; discarding {} points",
                self.glyph.name().map(Name::as_str),
                scratch.len()
            );
        }
    }
}
