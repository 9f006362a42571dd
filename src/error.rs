//! Error types.

use std::path::PathBuf;

/// An error that occurs when naming, inserting, renaming or looking up
/// glyphs and layers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum NamingError {
    /// The name is empty or contains control characters.
    #[error("'{0}' is not a valid name")]
    Invalid(String),
    /// A glyph without a name was inserted into a layer.
    #[error("glyph has no name and cannot be added to a layer")]
    Unnamed,
    /// A glyph with this name already exists in the layer.
    #[error("a glyph named '{glyph}' already exists in layer '{layer}'")]
    DuplicateGlyph {
        /// The layer name.
        layer: String,
        /// The glyph name.
        glyph: String,
    },
    /// A layer with this name already exists in the layer set.
    #[error("a layer named '{0}' already exists")]
    DuplicateLayer(String),
    /// No glyph with this name exists in the layer.
    #[error("glyph '{glyph}' missing from layer '{layer}'")]
    MissingGlyph {
        /// The layer name.
        layer: String,
        /// The glyph name.
        glyph: String,
    },
    /// No layer with this name exists in the layer set.
    #[error("layer '{0}' does not exist")]
    MissingLayer(String),
    /// A glyph was supplied under a key that does not match its own name.
    #[error("glyph has incorrect name: expected '{expected}', found '{found}'")]
    Mismatch {
        /// The key the glyph was supplied under.
        expected: String,
        /// The glyph's own name.
        found: String,
    },
}

/// An error that occurs while assembling a [`LayerSet`].
///
/// [`LayerSet`]: crate::LayerSet
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum LayerSetError {
    /// No layers were supplied.
    #[error("a layer set must contain at least one layer")]
    NoLayers,
    /// The designated default layer is not among the supplied layers.
    #[error("default layer '{0}' must be in the layer set")]
    DefaultLayerNotFound(String),
    /// Two supplied layers share a name.
    #[error("duplicate layer name '{0}'")]
    DuplicateLayer(String),
}

/// An error converting between symbolic and numeric segment types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum SegmentTypeError {
    /// The symbolic segment type is not one of `move`, `line`, `curve`, `qcurve`
    /// or none.
    #[error("unknown segment type '{0}'")]
    UnknownName(String),
    /// The numeric segment type is outside `0..=4`.
    #[error("unknown segment type code {0}")]
    UnknownCode(u8),
}

/// An error that occurs while drawing into or out of a glyph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum PenError {
    /// A point or end-of-path arrived while no path was open.
    #[error("must call begin_path() before calling add_point() or end_path()")]
    PathNotStarted,
    /// A path was begun, or a component added, while another path was open.
    #[error("unfinished drawing, you must call end_path()")]
    UnfinishedDrawing,
    /// A move point was added after the first point of a contour.
    #[error("unexpected move point, can only occur at start of contour")]
    UnexpectedMove,
    /// An off-curve point was marked smooth.
    #[error("unexpected smooth attribute on an off-curve point")]
    UnexpectedSmooth,
    /// An off-curve point was followed by a line point.
    #[error("an off-curve point must be followed by a curve or qcurve")]
    UnexpectedPointAfterOffCurve,
    /// More than two off-curve points preceded a curve point.
    #[error("at most two off-curve points can precede a curve")]
    TooManyOffCurves,
    /// An open contour ended on off-curve points.
    #[error("open contours must not have trailing off-curves")]
    TrailingOffCurves,
    /// A segment call was made without any points.
    #[error("segment requires at least one point")]
    MissingPoints,
    /// A symbolic segment type could not be encoded.
    #[error(transparent)]
    SegmentType(#[from] SegmentTypeError),
}

/// An error representing an invalid [`Identifier`].
///
/// [`Identifier`]: crate::Identifier
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("identifier '{0}' must be at most 100 characters, each in the range 0x20..=0x7E")]
pub struct IdentifierError(pub(crate) String);

/// An error representing an invalid [`Color`] string.
///
/// [`Color`]: crate::Color
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color string '{string}'")]
pub struct InvalidColorString {
    /// The string that failed to parse.
    string: String,
}

impl InvalidColorString {
    pub(crate) fn new(string: String) -> Self {
        InvalidColorString { string }
    }
}

/// An error building a [`Guideline`] from its keyed fields.
///
/// [`Guideline`]: crate::Guideline
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum GuidelineError {
    /// Neither `x` nor `y` was given.
    #[error("x or y must be present in a guideline")]
    MissingCoordinate,
    /// An angle was given with only one of `x` and `y`.
    #[error("angle must only be specified when both x and y are specified")]
    UnexpectedAngle,
    /// Both `x` and `y` were given without an angle.
    #[error("angle must be specified when both x and y are specified")]
    MissingAngle,
    /// The angle is outside `0..=360`.
    #[error("angle must be between 0 and 360 degrees")]
    AngleOutOfRange,
}

/// An error returned by a [`Storage`] collaborator while loading a font.
///
/// The underlying cause is opaque to this crate and is surfaced unchanged.
///
/// [`Storage`]: crate::Storage
#[derive(Debug, thiserror::Error)]
#[error("failed to load font from '{path}'")]
pub struct LoadError {
    /// The path that was being loaded.
    pub path: PathBuf,
    /// The storage-specific cause.
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync + 'static>,
}

/// An error returned by a [`Storage`] collaborator while saving a font.
///
/// [`Storage`]: crate::Storage
#[derive(Debug, thiserror::Error)]
#[error("failed to save font to '{path}'")]
pub struct SaveError {
    /// The path that was being written.
    pub path: PathBuf,
    /// The storage-specific cause.
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync + 'static>,
}

impl LoadError {
    /// Wrap a storage-specific error.
    pub fn new(
        path: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    ) -> Self {
        LoadError { path: path.into(), source: source.into() }
    }
}

impl SaveError {
    /// Wrap a storage-specific error.
    pub fn new(
        path: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    ) -> Self {
        SaveError { path: path.into(), source: source.into() }
    }
}
