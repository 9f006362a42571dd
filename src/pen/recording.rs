//! Pens that remember what was drawn.

use super::{Pen, PointPen};
use crate::error::PenError;
use crate::{AffineTransform, Identifier, Name, PointType};

/// A single call made to a [`Pen`].
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum PenCommand {
    MoveTo((f64, f64)),
    LineTo((f64, f64)),
    CurveTo(Vec<(f64, f64)>, (f64, f64)),
    QCurveTo(Vec<(f64, f64)>, Option<(f64, f64)>),
    ClosePath,
    EndPath,
    AddComponent { base: Name, transform: AffineTransform },
}

/// A single call made to a [`PointPen`].
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum PointPenCommand {
    BeginPath {
        identifier: Option<Identifier>,
    },
    AddPoint {
        pt: (f64, f64),
        typ: PointType,
        smooth: bool,
        name: Option<String>,
        identifier: Option<Identifier>,
    },
    EndPath,
    AddComponent {
        base: Name,
        transform: AffineTransform,
        identifier: Option<Identifier>,
    },
}

/// A [`Pen`] that records every call, for later inspection or replay.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingPen {
    commands: Vec<PenCommand>,
}

/// A [`PointPen`] that records every call, for later inspection or replay.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingPointPen {
    commands: Vec<PointPenCommand>,
}

impl RecordingPen {
    /// The recorded calls, in order.
    pub fn commands(&self) -> &[PenCommand] {
        &self.commands
    }

    /// Take the recorded calls.
    pub fn into_commands(self) -> Vec<PenCommand> {
        self.commands
    }

    /// Make the recorded calls again, on another pen.
    pub fn replay(&self, pen: &mut impl Pen) -> Result<(), PenError> {
        for command in &self.commands {
            match command {
                PenCommand::MoveTo(pt) => pen.move_to(*pt)?,
                PenCommand::LineTo(pt) => pen.line_to(*pt)?,
                PenCommand::CurveTo(offs, end) => pen.curve_to(offs, *end)?,
                PenCommand::QCurveTo(offs, end) => pen.qcurve_to(offs, *end)?,
                PenCommand::ClosePath => pen.close_path()?,
                PenCommand::EndPath => pen.end_path()?,
                PenCommand::AddComponent { base, transform } => {
                    pen.add_component(base.clone(), *transform)?
                }
            }
        }
        Ok(())
    }
}

impl RecordingPointPen {
    /// The recorded calls, in order.
    pub fn commands(&self) -> &[PointPenCommand] {
        &self.commands
    }

    /// Take the recorded calls.
    pub fn into_commands(self) -> Vec<PointPenCommand> {
        self.commands
    }

    /// Make the recorded calls again, on another point pen.
    pub fn replay(&self, pen: &mut impl PointPen) -> Result<(), PenError> {
        for command in self.commands.iter().cloned() {
            match command {
                PointPenCommand::BeginPath { identifier } => pen.begin_path(identifier)?,
                PointPenCommand::AddPoint { pt, typ, smooth, name, identifier } => {
                    pen.add_point(pt, typ, smooth, name, identifier)?
                }
                PointPenCommand::EndPath => pen.end_path()?,
                PointPenCommand::AddComponent { base, transform, identifier } => {
                    pen.add_component(base, transform, identifier)?
                }
            }
        }
        Ok(())
    }
}

impl Pen for RecordingPen {
    fn move_to(&mut self, pt: (f64, f64)) -> Result<(), PenError> {
        self.commands.push(PenCommand::MoveTo(pt));
        Ok(())
    }

    fn line_to(&mut self, pt: (f64, f64)) -> Result<(), PenError> {
        self.commands.push(PenCommand::LineTo(pt));
        Ok(())
    }

    fn curve_to(&mut self, off_curves: &[(f64, f64)], end: (f64, f64)) -> Result<(), PenError> {
        self.commands.push(PenCommand::CurveTo(off_curves.to_vec(), end));
        Ok(())
    }

    fn qcurve_to(
        &mut self,
        off_curves: &[(f64, f64)],
        end: Option<(f64, f64)>,
    ) -> Result<(), PenError> {
        self.commands.push(PenCommand::QCurveTo(off_curves.to_vec(), end));
        Ok(())
    }

    fn close_path(&mut self) -> Result<(), PenError> {
        self.commands.push(PenCommand::ClosePath);
        Ok(())
    }

    fn end_path(&mut self) -> Result<(), PenError> {
        self.commands.push(PenCommand::EndPath);
        Ok(())
    }

    fn add_component(&mut self, base: Name, transform: AffineTransform) -> Result<(), PenError> {
        self.commands.push(PenCommand::AddComponent { base, transform });
        Ok(())
    }
}

impl PointPen for RecordingPointPen {
    fn begin_path(&mut self, identifier: Option<Identifier>) -> Result<(), PenError> {
        self.commands.push(PointPenCommand::BeginPath { identifier });
        Ok(())
    }

    fn add_point(
        &mut self,
        pt: (f64, f64),
        typ: PointType,
        smooth: bool,
        name: Option<String>,
        identifier: Option<Identifier>,
    ) -> Result<(), PenError> {
        self.commands.push(PointPenCommand::AddPoint { pt, typ, smooth, name, identifier });
        Ok(())
    }

    fn end_path(&mut self) -> Result<(), PenError> {
        self.commands.push(PointPenCommand::EndPath);
        Ok(())
    }

    fn add_component(
        &mut self,
        base: Name,
        transform: AffineTransform,
        identifier: Option<Identifier>,
    ) -> Result<(), PenError> {
        self.commands.push(PointPenCommand::AddComponent { base, transform, identifier });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replay_into_another_recorder() {
        let mut first = RecordingPen::default();
        first.move_to((0., 0.)).unwrap();
        first.qcurve_to(&[(5., 5.)], Some((10., 0.))).unwrap();
        first.end_path().unwrap();
        first.add_component(Name::new("ring").unwrap(), AffineTransform::default()).unwrap();

        let mut second = RecordingPen::default();
        first.replay(&mut second).unwrap();
        assert_eq!(first, second);
        assert_eq!(second.commands().len(), 4);
    }

    #[test]
    fn replay_points() {
        let mut first = RecordingPointPen::default();
        first.begin_path(Some(Identifier::new("c").unwrap())).unwrap();
        first.add_point((1., 2.), PointType::Line, true, Some("p".into()), None).unwrap();
        first.end_path().unwrap();

        let mut second = RecordingPointPen::default();
        first.replay(&mut second).unwrap();
        assert_eq!(first.into_commands(), second.into_commands());
    }
}
