//! Glyphs and the objects inside them.

mod affine;
mod anchor;
mod codepoints;
mod component;
mod contour;
mod point;

use serde::{Deserialize, Serialize};

pub use affine::AffineTransform;
pub use anchor::Anchor;
pub use codepoints::Codepoints;
pub use component::Component;
pub use contour::Contour;
pub use point::{decode_segment_type, encode_segment_type, ContourPoint, PointType};

use crate::error::PenError;
use crate::name::Name;
use crate::pen::{GlyphPointPen, Pen, PointPen, PointToSegmentPen, SegmentToPointPen};
use crate::{Guideline, Plist};

/// A glyph: a drawable unit made of contours and components, with anchors,
/// guidelines and free-form metadata.
///
/// A glyph can exist without a name, but it must be given one before it can
/// be added to a [`Layer`]. Once in a layer its name is its key, and it can
/// only be changed through [`Layer::rename_glyph`].
///
/// [`Layer`]: crate::Layer
/// [`Layer::rename_glyph`]: crate::Layer::rename_glyph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Glyph {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) name: Option<Name>,
    /// Glyph height.
    pub height: f64,
    /// Glyph width.
    pub width: f64,
    /// Unicode codepoints mapped to this glyph. The first is the primary one.
    #[serde(skip_serializing_if = "Codepoints::is_empty")]
    pub codepoints: Codepoints,
    /// Arbitrary glyph note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Glyph guidelines.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub guidelines: Vec<Guideline>,
    /// Glyph anchors.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub anchors: Vec<Anchor>,
    /// Glyph components.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<Component>,
    /// Glyph contours.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub contours: Vec<Contour>,
    /// Glyph library data.
    #[serde(skip_serializing_if = "Plist::is_empty")]
    pub lib: Plist,
}

impl Glyph {
    /// Returns a new, empty [`Glyph`] with the given `name`.
    ///
    /// An empty string makes an unnamed glyph.
    ///
    /// # Panics
    ///
    /// Panics if `name` contains control characters. Use [`Glyph::named`]
    /// with a checked [`Name`] to avoid this.
    pub fn new(name: &str) -> Self {
        if name.is_empty() {
            Glyph::unnamed()
        } else {
            Glyph::named(Name::new_raw(name))
        }
    }

    /// Returns a new, empty glyph with the given name.
    pub fn named(name: Name) -> Self {
        Glyph { name: Some(name), ..Default::default() }
    }

    /// Returns a new, empty glyph with no name.
    pub fn unnamed() -> Self {
        Glyph::default()
    }

    /// The name of the glyph, if it has one.
    pub fn name(&self) -> Option<&Name> {
        self.name.as_ref()
    }

    pub(crate) fn set_name(&mut self, name: Name) {
        self.name = Some(name);
    }

    /// Append a contour.
    pub fn append_contour(&mut self, contour: Contour) {
        self.contours.push(contour);
    }

    /// Append a component.
    pub fn append_component(&mut self, component: Component) {
        self.components.push(component);
    }

    /// Append an anchor.
    pub fn append_anchor(&mut self, anchor: Anchor) {
        self.anchors.push(anchor);
    }

    /// Append a guideline, given either as a [`Guideline`] or as
    /// [`GuidelineFields`] that describe one.
    ///
    /// [`GuidelineFields`]: crate::GuidelineFields
    pub fn append_guideline<G: TryInto<Guideline>>(&mut self, guideline: G) -> Result<(), G::Error> {
        self.guidelines.push(guideline.try_into()?);
        Ok(())
    }

    /// Remove all contours.
    pub fn clear_contours(&mut self) {
        self.contours.clear();
    }

    /// Remove all components.
    pub fn clear_components(&mut self) {
        self.components.clear();
    }

    /// Returns true if [`Glyph`] contains one or more [`Component`]s.
    pub fn has_component(&self) -> bool {
        !self.components.is_empty()
    }

    /// Returns the number of [`Component`]s in the Glyph.
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Returns true if the Glyph contains one or more [`Component`]s with base
    /// glyph name `basename`.
    pub fn has_component_with_base(&self, basename: &str) -> bool {
        self.components.iter().any(|x| x.base == basename)
    }

    /// Returns an iterator over the [`Component`]s with base glyph name `basename`.
    pub fn get_components_with_base<'b, 'a: 'b>(
        &'a self,
        basename: &'b str,
    ) -> impl Iterator<Item = &'a Component> + 'b {
        self.components.iter().filter(move |x| x.base == basename)
    }

    /// Send the outline to a [`PointPen`]: every contour, then every component.
    pub fn draw_points(&self, pen: &mut impl PointPen) -> Result<(), PenError> {
        for contour in &self.contours {
            contour.draw_points(pen)?;
        }
        for component in &self.components {
            pen.add_component(
                component.base.clone(),
                component.transform,
                component.identifier().cloned(),
            )?;
        }
        Ok(())
    }

    /// Send the outline to a segment [`Pen`].
    pub fn draw(&self, pen: &mut impl Pen) -> Result<(), PenError> {
        let mut point_pen = PointToSegmentPen::new(pen);
        self.draw_points(&mut point_pen)
    }

    /// A point pen that draws into this glyph.
    pub fn point_pen(&mut self) -> GlyphPointPen<'_> {
        GlyphPointPen::new(self)
    }

    /// A segment pen that draws into this glyph.
    pub fn pen(&mut self) -> SegmentToPointPen<GlyphPointPen<'_>> {
        SegmentToPointPen::new(self.point_pen())
    }
}
