//! The document root.

#![deny(rustdoc::broken_intra_doc_links)]

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LoadError, NamingError, SaveError};
use crate::fontinfo::FontInfo;
use crate::glyph::Glyph;
use crate::guideline::Guideline;
use crate::layer::{Layer, LayerSet};
use crate::name::Name;
use crate::shared_types::Plist;
use crate::store::Storage;

/// A font source document.
///
/// A font owns its layers, its font-wide metadata and its global guidelines.
/// Glyph-level conveniences such as [`Font::get_glyph`] act on the default
/// layer; use [`Font::layers`] to reach the others.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Font {
    /// The font's layers. There is always at least the default layer.
    pub layers: LayerSet,
    /// Font-wide metadata.
    #[serde(skip_serializing_if = "FontInfo::is_empty")]
    pub font_info: FontInfo,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    guidelines: Vec<Guideline>,
    /// Arbitrary font-wide data.
    #[serde(skip_serializing_if = "Plist::is_empty")]
    pub lib: Plist,
}

impl Font {
    /// Returns a new, empty [`Font`] object, with a single empty default layer.
    pub fn new() -> Self {
        Font::default()
    }

    /// Returns a [`Font`] with the given layers and no other data.
    pub fn from_layers(layers: LayerSet) -> Self {
        Font { layers, ..Default::default() }
    }

    /// Load a font from `path` using the given storage.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use fontdoc::{Font, PlistStore};
    ///
    /// let font = Font::load_with(&PlistStore::new(), "path/to/font.plist").expect("failed to load");
    /// ```
    pub fn load_with(storage: &impl Storage, path: impl AsRef<Path>) -> Result<Font, LoadError> {
        storage.load(path.as_ref())
    }

    /// Save this font to `path` using the given storage.
    pub fn save_with(&self, storage: &impl Storage, path: impl AsRef<Path>) -> Result<(), SaveError> {
        storage.save(self, path.as_ref())
    }

    /// Returns a fully independent copy of this font.
    ///
    /// This is the same as [`Clone::clone`]: a font shares no data with its copies.
    pub fn deep_copy(&self) -> Font {
        self.clone()
    }

    /// Returns a reference to the default layer.
    pub fn default_layer(&self) -> &Layer {
        self.layers.default_layer()
    }

    /// Returns a mutable reference to the default layer.
    pub fn default_layer_mut(&mut self) -> &mut Layer {
        self.layers.default_layer_mut()
    }

    /// Returns an iterator over all layers in this font object.
    pub fn iter_layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }

    /// Create a new, empty layer after all existing layers.
    pub fn new_layer(&mut self, name: &str) -> Result<&mut Layer, NamingError> {
        self.layers.new_layer(name)
    }

    /// Returns an iterator over all the glyph names _in the default layer_.
    pub fn iter_names(&self) -> impl Iterator<Item = &Name> {
        self.default_layer().names()
    }

    /// Returns an iterator over all the glyphs _in the default layer_.
    pub fn iter_glyphs(&self) -> impl Iterator<Item = &Glyph> {
        self.default_layer().iter()
    }

    /// Returns a reference to the glyph with the given name _in the default
    /// layer_.
    pub fn get_glyph(&self, name: &str) -> Option<&Glyph> {
        self.default_layer().get_glyph(name)
    }

    /// Returns a mutable reference to the glyph with the given name
    /// _in the default layer_, if it exists.
    pub fn get_glyph_mut(&mut self, name: &str) -> Option<&mut Glyph> {
        self.default_layer_mut().get_glyph_mut(name)
    }

    /// Returns `true` if the default layer contains a glyph with this name.
    pub fn contains_glyph(&self, name: &str) -> bool {
        self.default_layer().contains_glyph(name)
    }

    /// Returns the total number of glyphs _in the default layer_.
    pub fn glyph_count(&self) -> usize {
        self.default_layer().len()
    }

    /// Create an empty glyph _in the default layer_.
    ///
    /// See [`Layer::new_glyph`].
    pub fn new_glyph(&mut self, name: &str) -> Result<&mut Glyph, NamingError> {
        self.default_layer_mut().new_glyph(name)
    }

    /// Insert a glyph _in the default layer_.
    ///
    /// See [`Layer::insert_glyph`].
    pub fn insert_glyph(
        &mut self,
        glyph: Glyph,
        name: Option<&str>,
        overwrite: bool,
    ) -> Result<(), NamingError> {
        self.default_layer_mut().insert_glyph(glyph, name, overwrite)
    }

    /// Add a glyph _to the default layer_, failing if its name is taken.
    pub fn add_glyph(&mut self, glyph: Glyph) -> Result<(), NamingError> {
        self.default_layer_mut().add_glyph(glyph)
    }

    /// Remove a glyph _from the default layer_ and return it, if it exists.
    pub fn remove_glyph(&mut self, name: &str) -> Option<Glyph> {
        self.default_layer_mut().remove_glyph(name)
    }

    /// Rename a glyph _in the default layer_.
    ///
    /// See [`Layer::rename_glyph`].
    pub fn rename_glyph(&mut self, old: &str, new: &str, overwrite: bool) -> Result<(), NamingError> {
        self.default_layer_mut().rename_glyph(old, new, overwrite)
    }

    /// Return the font's global guidelines.
    pub fn guidelines(&self) -> &[Guideline] {
        &self.guidelines
    }

    /// Returns a mutable reference to the font's global guidelines.
    pub fn guidelines_mut(&mut self) -> &mut Vec<Guideline> {
        &mut self.guidelines
    }

    /// Append a global guideline, given either as a [`Guideline`] or as
    /// [`GuidelineFields`] that describe one.
    ///
    /// [`GuidelineFields`]: crate::GuidelineFields
    pub fn append_guideline<G: TryInto<Guideline>>(&mut self, guideline: G) -> Result<(), G::Error> {
        self.guidelines.push(guideline.try_into()?);
        Ok(())
    }

    /// Replace all global guidelines, returning the previous ones.
    pub fn replace_guidelines(
        &mut self,
        guidelines: impl IntoIterator<Item = Guideline>,
    ) -> Vec<Guideline> {
        std::mem::replace(&mut self.guidelines, guidelines.into_iter().collect())
    }
}

/// A font that may not have been loaded yet.
#[derive(Clone, Debug, PartialEq)]
pub enum FontSlot {
    /// Only the location of the font is known.
    Unloaded(PathBuf),
    /// The font is in memory.
    Loaded(Font),
}

impl FontSlot {
    /// Returns `true` if the font is in memory.
    pub fn is_loaded(&self) -> bool {
        matches!(self, FontSlot::Loaded(_))
    }

    /// Returns the font, if it is in memory.
    pub fn font(&self) -> Option<&Font> {
        match self {
            FontSlot::Loaded(font) => Some(font),
            FontSlot::Unloaded(_) => None,
        }
    }

    /// Returns the font, loading it with `storage` first if needed.
    ///
    /// On error the slot stays unloaded.
    pub fn get_or_load(&mut self, storage: &impl Storage) -> Result<&mut Font, LoadError> {
        match self {
            FontSlot::Loaded(font) => Ok(font),
            FontSlot::Unloaded(path) => {
                let font = storage.load(path)?;
                *self = FontSlot::Loaded(font);
                self.get_or_load(storage)
            }
        }
    }
}

impl From<Font> for FontSlot {
    fn from(font: Font) -> Self {
        FontSlot::Loaded(font)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{GuidelineFields, Line};

    struct CountingStore {
        loads: Cell<usize>,
        font: Option<Font>,
    }

    impl Storage for CountingStore {
        fn load(&self, path: &Path) -> Result<Font, LoadError> {
            self.loads.set(self.loads.get() + 1);
            self.font.clone().ok_or_else(|| LoadError::new(path, "nothing stored"))
        }

        fn save(&self, _font: &Font, _path: &Path) -> Result<(), SaveError> {
            Ok(())
        }
    }

    #[test]
    fn new_font_has_default_layer() {
        let font = Font::new();
        assert_eq!(font.layers.len(), 1);
        assert_eq!(font.default_layer().name(), crate::DEFAULT_LAYER_NAME);
        assert_eq!(font.glyph_count(), 0);
        assert!(font.guidelines().is_empty());
    }

    #[test]
    fn glyph_conveniences_use_default_layer() {
        let mut font = Font::new();
        font.new_layer("background").unwrap().add_glyph(Glyph::new("b")).unwrap();
        font.add_glyph(Glyph::new("a")).unwrap();
        font.new_glyph("c").unwrap().width = 300.;

        assert!(font.contains_glyph("a"));
        assert!(!font.contains_glyph("b"));
        assert_eq!(font.get_glyph("c").unwrap().width, 300.);
        assert_eq!(font.iter_names().map(Name::as_str).collect::<Vec<_>>(), vec!["a", "c"]);

        font.rename_glyph("a", "A", false).unwrap();
        assert_eq!(font.iter_glyphs().count(), 2);
        assert!(font.remove_glyph("A").is_some());
        assert_eq!(font.glyph_count(), 1);
        assert!(matches!(font.add_glyph(Glyph::new("c")), Err(NamingError::DuplicateGlyph { .. })));
    }

    #[test]
    fn deep_copy_is_independent() {
        let mut font = Font::new();
        font.add_glyph(Glyph::new("a")).unwrap();
        font.lib.insert("key".into(), plist::Value::String("value".into()));

        let mut copy = font.deep_copy();
        assert_eq!(copy, font);

        copy.get_glyph_mut("a").unwrap().width = 500.;
        copy.add_glyph(Glyph::new("b")).unwrap();
        copy.lib.clear();
        assert_ne!(copy, font);
        assert_eq!(font.get_glyph("a").unwrap().width, 0.);
        assert!(!font.contains_glyph("b"));
        assert_eq!(font.lib.len(), 1);
    }

    #[test]
    fn guidelines() {
        let mut font = Font::new();
        font.append_guideline(GuidelineFields {
            x: Some(10.),
            y: Some(20.),
            angle: Some(45.),
            name: Some("diagonal".into()),
            ..Default::default()
        })
        .unwrap();
        font.guidelines_mut().push(Guideline::from_line(Line::Horizontal(700.)));
        assert_eq!(font.guidelines().len(), 2);
        assert_eq!(font.guidelines()[0].line, Line::Angle { x: 10., y: 20., degrees: 45. });

        let old = font.replace_guidelines(vec![Guideline::from_line(Line::Vertical(0.))]);
        assert_eq!(old.len(), 2);
        assert_eq!(font.guidelines().len(), 1);
    }

    #[test]
    fn slot_loads_once() {
        let mut stored = Font::new();
        stored.add_glyph(Glyph::new("a")).unwrap();
        let store = CountingStore { loads: Cell::new(0), font: Some(stored.clone()) };

        let mut slot = FontSlot::Unloaded("font.plist".into());
        assert!(!slot.is_loaded());
        assert_eq!(slot.get_or_load(&store).unwrap(), &stored);
        slot.get_or_load(&store).unwrap().add_glyph(Glyph::new("b")).unwrap();
        assert_eq!(store.loads.get(), 1);
        assert_eq!(slot.font().unwrap().glyph_count(), 2);
    }

    #[test]
    fn failed_load_stays_unloaded() {
        let store = CountingStore { loads: Cell::new(0), font: None };
        let mut slot = FontSlot::Unloaded("missing.plist".into());
        let err = slot.get_or_load(&store).unwrap_err();
        assert_eq!(err.path, Path::new("missing.plist"));
        assert_eq!(slot, FontSlot::Unloaded("missing.plist".into()));
    }
}
