//! Guidelines, on glyphs and on fonts.

use serde::{Deserialize, Serialize};

use crate::error::GuidelineError;
use crate::{Color, Identifier, Plist};

/// A guideline associated with a glyph or a font.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GuidelineFields", into = "GuidelineFields")]
pub struct Guideline {
    /// The line itself.
    pub line: Line,
    /// An arbitrary name for the guideline.
    pub name: Option<String>,
    /// The color of the line.
    pub color: Option<Color>,
    identifier: Option<Identifier>,
    lib: Option<Plist>,
}

/// An infinite line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Line {
    /// A vertical line, passing through a given `x` coordinate.
    Vertical(f64),
    /// A horizontal line, passing through a given `y` coordinate.
    Horizontal(f64),
    /// An angled line passing through `(x, y)` at `degrees` degrees
    /// counter-clockwise to the horizontal.
    Angle {
        /// x coordinate.
        x: f64,
        /// y coordinate.
        y: f64,
        /// angle degrees.
        degrees: f64,
    },
}

/// A guideline described by its keyed fields.
///
/// This is the loose, record-like form of a guideline: `x`, `y` and `angle`
/// are each optional and only certain combinations describe a line. Convert
/// it to a [`Guideline`] with `TryFrom`, which checks the combination:
///
/// - `x` alone is a vertical line, `y` alone a horizontal one;
/// - `x`, `y` and `angle` together are an angled line, with the angle in
///   `0..=360`;
/// - anything else is an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GuidelineFields {
    /// The x coordinate, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// The y coordinate, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// The angle in degrees, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
    /// An arbitrary name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The color of the line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    /// The identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<Identifier>,
    /// The lib.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lib: Option<Plist>,
}

impl Guideline {
    /// Create a new guideline.
    pub fn new(
        line: Line,
        name: Option<String>,
        color: Option<Color>,
        identifier: Option<Identifier>,
        lib: Option<Plist>,
    ) -> Self {
        let mut this = Self { line, name, color, identifier, lib: None };
        if let Some(lib) = lib {
            this.replace_lib(lib);
        }
        this
    }

    /// A guideline with only a line.
    pub fn from_line(line: Line) -> Self {
        Guideline::new(line, None, None, None, None)
    }
}

impl_object_lib!(Guideline, "guideline");

impl Line {
    /// The `(x, y, angle)` triple for this line, as it would appear in keyed form.
    pub fn to_fields(&self) -> (Option<f64>, Option<f64>, Option<f64>) {
        match *self {
            Line::Vertical(x) => (Some(x), None, None),
            Line::Horizontal(y) => (None, Some(y), None),
            Line::Angle { x, y, degrees } => (Some(x), Some(y), Some(degrees)),
        }
    }

    /// Build a line from keyed `x`, `y` and `angle` values.
    pub fn from_fields(
        x: Option<f64>,
        y: Option<f64>,
        angle: Option<f64>,
    ) -> Result<Line, GuidelineError> {
        match (x, y, angle) {
            (Some(x), None, None) => Ok(Line::Vertical(x)),
            (None, Some(y), None) => Ok(Line::Horizontal(y)),
            (Some(x), Some(y), Some(degrees)) => {
                if (0.0..=360.0).contains(&degrees) {
                    Ok(Line::Angle { x, y, degrees })
                } else {
                    Err(GuidelineError::AngleOutOfRange)
                }
            }
            (None, None, _) => Err(GuidelineError::MissingCoordinate),
            (None, Some(_), Some(_)) | (Some(_), None, Some(_)) => {
                Err(GuidelineError::UnexpectedAngle)
            }
            (Some(_), Some(_), None) => Err(GuidelineError::MissingAngle),
        }
    }
}

impl TryFrom<GuidelineFields> for Guideline {
    type Error = GuidelineError;

    fn try_from(fields: GuidelineFields) -> Result<Self, Self::Error> {
        let line = Line::from_fields(fields.x, fields.y, fields.angle)?;
        Ok(Guideline::new(line, fields.name, fields.color, fields.identifier, fields.lib))
    }
}

impl From<&Guideline> for GuidelineFields {
    fn from(guideline: &Guideline) -> Self {
        let (x, y, angle) = guideline.line.to_fields();
        GuidelineFields {
            x,
            y,
            angle,
            name: guideline.name.clone(),
            color: guideline.color,
            identifier: guideline.identifier.clone(),
            lib: guideline.lib.clone(),
        }
    }
}

impl From<Guideline> for GuidelineFields {
    fn from(guideline: Guideline) -> Self {
        let (x, y, angle) = guideline.line.to_fields();
        GuidelineFields {
            x,
            y,
            angle,
            name: guideline.name,
            color: guideline.color,
            identifier: guideline.identifier,
            lib: guideline.lib,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_test::{assert_de_tokens_error, assert_tokens, Token};

    use super::*;

    #[test]
    fn keyed_fields_to_lines() {
        let vertical = GuidelineFields { x: Some(10.0), ..Default::default() };
        assert_eq!(Guideline::try_from(vertical).unwrap().line, Line::Vertical(10.0));

        let angled =
            GuidelineFields { x: Some(1.0), y: Some(2.0), angle: Some(45.0), ..Default::default() };
        assert_eq!(
            Guideline::try_from(angled).unwrap().line,
            Line::Angle { x: 1.0, y: 2.0, degrees: 45.0 }
        );
    }

    #[test]
    fn keyed_field_errors() {
        let cases = [
            (GuidelineFields::default(), GuidelineError::MissingCoordinate),
            (
                GuidelineFields { y: Some(3.0), angle: Some(10.0), ..Default::default() },
                GuidelineError::UnexpectedAngle,
            ),
            (
                GuidelineFields { x: Some(3.0), y: Some(3.0), ..Default::default() },
                GuidelineError::MissingAngle,
            ),
            (
                GuidelineFields { x: Some(3.0), y: Some(3.0), angle: Some(361.0), ..Default::default() },
                GuidelineError::AngleOutOfRange,
            ),
        ];
        for (fields, expected) in cases {
            assert_eq!(Guideline::try_from(fields).unwrap_err(), expected);
        }
    }

    #[test]
    fn fields_round_trip_keeps_metadata() {
        let guideline = Guideline::new(
            Line::Horizontal(500.0),
            Some("xheight".into()),
            Some(Color::new(0.0, 0.0, 1.0, 1.0).unwrap()),
            Some(Identifier::new("guide-1").unwrap()),
            None,
        );
        let fields = GuidelineFields::from(&guideline);
        assert_eq!(fields.y, Some(500.0));
        assert_eq!(fields.x, None);
        assert_eq!(Guideline::try_from(fields).unwrap(), guideline);
    }

    #[test]
    fn serde_tokens() {
        let guideline = Guideline::new(
            Line::Angle { x: 10.0, y: 20.0, degrees: 360.0 },
            Some("hello".to_string()),
            None,
            Some(Identifier::new("abcABC123").unwrap()),
            None,
        );
        assert_tokens(
            &guideline,
            &[
                Token::Struct { name: "GuidelineFields", len: 5 },
                Token::Str("x"),
                Token::Some,
                Token::F64(10.0),
                Token::Str("y"),
                Token::Some,
                Token::F64(20.0),
                Token::Str("angle"),
                Token::Some,
                Token::F64(360.0),
                Token::Str("name"),
                Token::Some,
                Token::Str("hello"),
                Token::Str("identifier"),
                Token::Some,
                Token::Str("abcABC123"),
                Token::StructEnd,
            ],
        );

        assert_de_tokens_error::<Guideline>(
            &[
                Token::Struct { name: "GuidelineFields", len: 1 },
                Token::Str("angle"),
                Token::Some,
                Token::F64(90.0),
                Token::StructEnd,
            ],
            "x or y must be present in a guideline",
        );
    }

    #[test]
    #[cfg(feature = "object-libs")]
    fn lib_assigns_identifier() {
        let mut guideline = Guideline::from_line(Line::Vertical(0.0));
        assert!(guideline.identifier().is_none());
        guideline.replace_lib(Plist::new());
        assert!(guideline.identifier().is_some());
        assert!(guideline.lib().is_some());
    }
}
