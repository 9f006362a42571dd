use indexmap::IndexMap;
use serde::de::{Deserializer, Error as _};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::error::{LayerSetError, NamingError};
use crate::name::Name;
use crate::shared_types::Color;
use crate::{Glyph, Plist};

/// The name of the default layer.
pub static DEFAULT_LAYER_NAME: &str = "public.default";

/// A collection of [`Layer`] objects.
///
/// A layer set always includes a default layer, and may also include additional
/// layers. Layer names are unique.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerSet {
    // The first layer is always the 'default layer'.
    layers: Vec<Layer>,
}

#[allow(clippy::len_without_is_empty)] // never empty
impl LayerSet {
    /// Create a new `LayerSet` from `layers`, with the layer named
    /// `default_name` as the default layer.
    ///
    /// The default layer is moved to the front; the other layers keep their
    /// relative order.
    pub fn new(mut layers: Vec<Layer>, default_name: &str) -> Result<Self, LayerSetError> {
        if layers.is_empty() {
            return Err(LayerSetError::NoLayers);
        }
        for (i, layer) in layers.iter().enumerate() {
            if layers[..i].iter().any(|l| l.name == layer.name) {
                return Err(LayerSetError::DuplicateLayer(layer.name.to_string()));
            }
        }
        let default_idx = layers
            .iter()
            .position(|l| l.name == default_name)
            .ok_or_else(|| LayerSetError::DefaultLayerNotFound(default_name.into()))?;
        let default = layers.remove(default_idx);
        layers.insert(0, default);
        Ok(LayerSet { layers })
    }

    /// Create a new `LayerSet` whose default layer is the one named
    /// [`DEFAULT_LAYER_NAME`].
    pub fn from_layers(layers: Vec<Layer>) -> Result<Self, LayerSetError> {
        LayerSet::new(layers, DEFAULT_LAYER_NAME)
    }

    /// The number of layers in the set.
    ///
    /// This is always non-zero.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Get a reference to a layer, by name.
    pub fn get(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }

    /// Get a mutable reference to a layer, by name.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.name == name)
    }

    /// Returns `true` if a layer with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Get a mutable reference to a layer, by name, or create it if it doesn't exist.
    pub fn get_or_create(&mut self, name: &str) -> Result<&mut Layer, NamingError> {
        let idx = match self.position(name) {
            Some(idx) => idx,
            None => {
                self.layers.push(Layer::new(Name::new(name)?));
                self.layers.len() - 1
            }
        };
        Ok(&mut self.layers[idx])
    }

    /// A reference to the default layer.
    pub fn default_layer(&self) -> &Layer {
        &self.layers[0]
    }

    /// A mutable reference to the default layer.
    pub fn default_layer_mut(&mut self) -> &mut Layer {
        &mut self.layers[0]
    }

    /// Iterate over all layers, default layer first.
    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }

    /// Iterate over all layers, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Layer> {
        self.layers.iter_mut()
    }

    /// Iterate over the names of all layers.
    pub fn names(&self) -> impl Iterator<Item = &Name> {
        self.layers.iter().map(|l| &l.name)
    }

    /// The layer names, in iteration order.
    ///
    /// This is also the order in which layers are written by storage.
    pub fn layer_order(&self) -> Vec<Name> {
        self.names().cloned().collect()
    }

    /// Create a new, empty layer with the given name, after all existing layers.
    pub fn new_layer(&mut self, name: &str) -> Result<&mut Layer, NamingError> {
        let name = Name::new(name)?;
        if self.contains(&name) {
            return Err(NamingError::DuplicateLayer(name.to_string()));
        }
        self.layers.push(Layer::new(name));
        let idx = self.layers.len() - 1;
        Ok(&mut self.layers[idx])
    }

    /// Remove a layer.
    ///
    /// The default layer cannot be removed.
    pub fn remove(&mut self, name: &str) -> Option<Layer> {
        self.layers
            .iter()
            .skip(1)
            .position(|l| l.name == name)
            .map(|idx| self.layers.remove(idx + 1))
    }

    /// Rename a layer.
    ///
    /// If `overwrite` is true, and a layer with the new name exists, it will
    /// be replaced. If the replaced layer was the default layer, the renamed
    /// layer becomes the default layer.
    ///
    /// Returns an error if `overwrite` is false but a layer with the new
    /// name exists, or if no layer with the old name exists.
    pub fn rename_layer(&mut self, old: &str, new: &str, overwrite: bool) -> Result<(), NamingError> {
        if old == new {
            return Ok(());
        }
        let new = Name::new(new)?;
        let target = self.position(&new);
        if !overwrite && target.is_some() {
            return Err(NamingError::DuplicateLayer(new.to_string()));
        }
        let mut idx = self.position(old).ok_or_else(|| NamingError::MissingLayer(old.into()))?;

        if let Some(target) = target {
            self.layers.remove(target);
            if target < idx {
                idx -= 1;
            }
            if target == 0 {
                let layer = self.layers.remove(idx);
                self.layers.insert(0, layer);
                idx = 0;
            }
        }
        log::debug!("renaming layer '{old}' to '{new}'");
        self.layers[idx].name = new;
        Ok(())
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.layers.iter().position(|l| l.name == name)
    }
}

impl Default for LayerSet {
    fn default() -> Self {
        LayerSet { layers: vec![Layer::default()] }
    }
}

impl Serialize for LayerSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.layers)
    }
}

impl<'de> Deserialize<'de> for LayerSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let layers = Vec::<Layer>::deserialize(deserializer)?;
        let default_name = match layers.first() {
            Some(layer) => layer.name.clone(),
            None => return Err(D::Error::custom(LayerSetError::NoLayers)),
        };
        LayerSet::new(layers, &default_name).map_err(D::Error::custom)
    }
}

/// A layer: a named collection of glyphs, keyed by glyph name.
///
/// Glyphs are kept in insertion order. A glyph's own name always matches
/// its key.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    glyphs: IndexMap<Name, Glyph>,
    name: Name,
    /// The layer's color.
    pub color: Option<Color>,
    /// The layer's lib, for arbitrary data.
    pub lib: Plist,
}

impl Layer {
    /// Create a new, empty layer with the provided name.
    pub fn new(name: Name) -> Self {
        Layer { glyphs: IndexMap::new(), name, color: None, lib: Plist::new() }
    }

    /// Create a layer from named glyphs, keyed by their own names.
    ///
    /// Fails if a glyph is unnamed or if two glyphs share a name.
    pub fn from_glyphs(
        name: Name,
        glyphs: impl IntoIterator<Item = Glyph>,
    ) -> Result<Self, NamingError> {
        let mut layer = Layer::new(name);
        for glyph in glyphs {
            layer.add_glyph(glyph)?;
        }
        Ok(layer)
    }

    /// Create a layer from `(name, glyph)` pairs.
    ///
    /// An unnamed glyph takes the name it is paired with; a glyph that already
    /// has a different name is rejected.
    pub fn from_named_glyphs(
        name: Name,
        glyphs: impl IntoIterator<Item = (Name, Glyph)>,
    ) -> Result<Self, NamingError> {
        let mut layer = Layer::new(name);
        for (key, glyph) in glyphs {
            if let Some(found) = glyph.name() {
                if *found != key {
                    return Err(NamingError::Mismatch {
                        expected: key.to_string(),
                        found: found.to_string(),
                    });
                }
            }
            layer.insert_glyph(glyph, Some(&key), false)?;
        }
        Ok(layer)
    }

    /// The number of [`Glyph`]s in the layer.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Returns `true` if this layer contains no glyphs.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// The name of the layer.
    ///
    /// This can only be mutated through the [`LayerSet`].
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Returns a reference to the glyph with the given name, if it exists.
    pub fn get_glyph(&self, name: &str) -> Option<&Glyph> {
        self.glyphs.get(name)
    }

    /// Returns a mutable reference to the glyph with the given name, if it exists.
    pub fn get_glyph_mut(&mut self, name: &str) -> Option<&mut Glyph> {
        self.glyphs.get_mut(name)
    }

    /// Returns `true` if this layer contains a glyph with this name.
    pub fn contains_glyph(&self, name: &str) -> bool {
        self.glyphs.contains_key(name)
    }

    /// Create an empty glyph with the given name, and return a reference to it.
    ///
    /// An existing glyph is never replaced.
    pub fn new_glyph(&mut self, name: &str) -> Result<&mut Glyph, NamingError> {
        let name = Name::new(name)?;
        if self.glyphs.contains_key(&name) {
            return Err(self.duplicate(&name));
        }
        let entry = self.glyphs.entry(name.clone()).or_insert_with(|| Glyph::named(name));
        Ok(entry)
    }

    /// Insert a glyph.
    ///
    /// The glyph is stored under `name` if given, otherwise under its own name,
    /// and its own name is updated to match. If a glyph with that name exists
    /// it is replaced in place when `overwrite` is true, and an error is
    /// returned otherwise.
    pub fn insert_glyph(
        &mut self,
        mut glyph: Glyph,
        name: Option<&str>,
        overwrite: bool,
    ) -> Result<(), NamingError> {
        let name = match name {
            Some("") => return Err(NamingError::Unnamed),
            Some(name) => Name::new(name)?,
            None => glyph.name().cloned().ok_or(NamingError::Unnamed)?,
        };
        if self.glyphs.contains_key(&name) {
            if !overwrite {
                return Err(self.duplicate(&name));
            }
            log::debug!("replacing glyph '{name}' in layer '{}'", self.name);
        }
        glyph.set_name(name.clone());
        self.glyphs.insert(name, glyph);
        Ok(())
    }

    /// Add a glyph under its own name, failing if the name is taken.
    pub fn add_glyph(&mut self, glyph: Glyph) -> Result<(), NamingError> {
        self.insert_glyph(glyph, None, false)
    }

    /// Remove all glyphs in the layer. Leave color and the lib untouched.
    pub fn clear(&mut self) {
        self.glyphs.clear()
    }

    /// Remove the named glyph from this layer and return it, if it exists.
    pub fn remove_glyph(&mut self, name: &str) -> Option<Glyph> {
        self.glyphs.shift_remove(name)
    }

    /// Rename a glyph.
    ///
    /// If `overwrite` is true, and a glyph with the new name exists, it will
    /// be replaced and the renamed glyph takes its place. Otherwise the renamed
    /// glyph moves to the end of the layer.
    ///
    /// Returns an error if `overwrite` is false but a glyph with the new
    /// name exists, or if no glyph with the old name exists.
    pub fn rename_glyph(&mut self, old: &str, new: &str, overwrite: bool) -> Result<(), NamingError> {
        if old == new {
            return Ok(());
        }
        let new = Name::new(new)?;
        if !overwrite && self.glyphs.contains_key(&new) {
            return Err(self.duplicate(&new));
        }
        let mut glyph = self.glyphs.shift_remove(old).ok_or_else(|| NamingError::MissingGlyph {
            layer: self.name.to_string(),
            glyph: old.into(),
        })?;
        log::debug!("renaming glyph '{old}' to '{new}' in layer '{}'", self.name);
        glyph.set_name(new.clone());
        self.glyphs.insert(new, glyph);
        Ok(())
    }

    /// Iterate over the glyphs in this layer.
    pub fn iter(&self) -> impl Iterator<Item = &Glyph> + '_ {
        self.glyphs.values()
    }

    /// Iterate over the glyphs in this layer, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Glyph> {
        self.glyphs.values_mut()
    }

    /// Iterate over the glyph names in this layer.
    pub fn names(&self) -> impl Iterator<Item = &Name> {
        self.glyphs.keys()
    }

    fn duplicate(&self, glyph: &Name) -> NamingError {
        NamingError::DuplicateGlyph { layer: self.name.to_string(), glyph: glyph.to_string() }
    }
}

impl Default for Layer {
    fn default() -> Self {
        Layer::new(Name::new_raw(DEFAULT_LAYER_NAME))
    }
}

#[derive(Serialize)]
struct LayerRecord<'a> {
    name: &'a Name,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<&'a Color>,
    #[serde(skip_serializing_if = "Plist::is_empty")]
    lib: &'a Plist,
    glyphs: Vec<&'a Glyph>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct LayerData {
    name: Name,
    #[serde(default)]
    color: Option<Color>,
    #[serde(default)]
    lib: Plist,
    #[serde(default)]
    glyphs: Vec<Glyph>,
}

impl Serialize for Layer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        LayerRecord {
            name: &self.name,
            color: self.color.as_ref(),
            lib: &self.lib,
            glyphs: self.glyphs.values().collect(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Layer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let LayerData { name, color, lib, glyphs } = LayerData::deserialize(deserializer)?;
        let mut layer = Layer::from_glyphs(name, glyphs).map_err(D::Error::custom)?;
        layer.color = color;
        layer.lib = lib;
        Ok(layer)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn name(s: &str) -> Name {
        Name::new(s).unwrap()
    }

    fn glyph_names(layer: &Layer) -> Vec<&str> {
        layer.names().map(Name::as_str).collect()
    }

    fn layer_names(layers: &LayerSet) -> Vec<&str> {
        layers.names().map(Name::as_str).collect()
    }

    #[test]
    fn add_then_get() {
        let mut layer = Layer::default();
        let mut glyph = Glyph::new("A");
        glyph.width = 420.;
        layer.add_glyph(glyph.clone()).unwrap();
        assert_eq!(layer.get_glyph("A"), Some(&glyph));
        assert_eq!(layer.len(), 1);
        assert!(layer.contains_glyph("A"));

        assert_eq!(
            layer.add_glyph(Glyph::new("A")),
            Err(NamingError::DuplicateGlyph { layer: DEFAULT_LAYER_NAME.into(), glyph: "A".into() })
        );
        assert_eq!(layer.get_glyph("A").unwrap().width, 420.);
    }

    #[test]
    fn insert_glyph_naming() {
        let mut layer = Layer::default();
        assert_eq!(layer.insert_glyph(Glyph::unnamed(), None, true), Err(NamingError::Unnamed));
        assert_eq!(layer.insert_glyph(Glyph::new("a"), Some(""), true), Err(NamingError::Unnamed));
        assert!(layer.is_empty());

        layer.insert_glyph(Glyph::unnamed(), Some("b"), false).unwrap();
        layer.insert_glyph(Glyph::new("x"), Some("c"), false).unwrap();
        assert_eq!(layer.get_glyph("b").unwrap().name().unwrap(), "b");
        assert_eq!(layer.get_glyph("c").unwrap().name().unwrap(), "c");
        assert!(!layer.contains_glyph("x"));
    }

    #[test]
    fn overwrite_keeps_position() {
        let mut layer = Layer::from_glyphs(
            name("fg"),
            ["a", "b", "c"].into_iter().map(Glyph::new),
        )
        .unwrap();
        let mut replacement = Glyph::new("b");
        replacement.width = 10.;
        layer.insert_glyph(replacement, None, true).unwrap();
        assert_eq!(glyph_names(&layer), vec!["a", "b", "c"]);
        assert_eq!(layer.get_glyph("b").unwrap().width, 10.);
    }

    #[test]
    fn new_glyph() {
        let mut layer = Layer::default();
        layer.new_glyph("space").unwrap().width = 250.;
        assert_eq!(layer.get_glyph("space").unwrap().width, 250.);
        assert!(matches!(layer.new_glyph("space"), Err(NamingError::DuplicateGlyph { .. })));
        assert!(matches!(layer.new_glyph(""), Err(NamingError::Invalid(_))));
        assert_eq!(layer.get_glyph("space").unwrap().width, 250.);
    }

    #[test]
    fn from_glyphs_rejects_bad_input() {
        assert_eq!(
            Layer::from_glyphs(name("fg"), vec![Glyph::new("a"), Glyph::unnamed()]),
            Err(NamingError::Unnamed)
        );
        assert!(matches!(
            Layer::from_glyphs(name("fg"), vec![Glyph::new("a"), Glyph::new("a")]),
            Err(NamingError::DuplicateGlyph { .. })
        ));
    }

    #[test]
    fn from_named_glyphs() {
        let layer = Layer::from_named_glyphs(
            name("fg"),
            vec![(name("a"), Glyph::unnamed()), (name("b"), Glyph::new("b"))],
        )
        .unwrap();
        assert_eq!(glyph_names(&layer), vec!["a", "b"]);
        assert_eq!(layer.get_glyph("a").unwrap().name().unwrap(), "a");

        assert_eq!(
            Layer::from_named_glyphs(name("fg"), vec![(name("a"), Glyph::new("b"))]),
            Err(NamingError::Mismatch { expected: "a".into(), found: "b".into() })
        );
    }

    #[test]
    fn rename_glyph() {
        let mut layer =
            Layer::from_glyphs(name("fg"), ["a", "b", "c"].into_iter().map(Glyph::new)).unwrap();

        layer.rename_glyph("a", "a", false).unwrap();
        assert_eq!(glyph_names(&layer), vec!["a", "b", "c"]);

        layer.rename_glyph("a", "z", false).unwrap();
        assert_eq!(glyph_names(&layer), vec!["b", "c", "z"]);
        assert_eq!(layer.get_glyph("z").unwrap().name().unwrap(), "z");

        assert!(matches!(
            layer.rename_glyph("b", "c", false),
            Err(NamingError::DuplicateGlyph { .. })
        ));
        assert!(matches!(
            layer.rename_glyph("nope", "other", false),
            Err(NamingError::MissingGlyph { .. })
        ));
        assert_eq!(glyph_names(&layer), vec!["b", "c", "z"]);

        layer.rename_glyph("b", "c", true).unwrap();
        assert_eq!(glyph_names(&layer), vec!["c", "z"]);
    }

    #[test]
    fn remove_and_clear() {
        let mut layer =
            Layer::from_glyphs(name("fg"), ["a", "b", "c"].into_iter().map(Glyph::new)).unwrap();
        layer.lib.insert("key".into(), plist::Value::Integer(1.into()));
        assert_eq!(layer.remove_glyph("b").unwrap().name().unwrap(), "b");
        assert_eq!(layer.remove_glyph("b"), None);
        assert_eq!(glyph_names(&layer), vec!["a", "c"]);
        layer.clear();
        assert!(layer.is_empty());
        assert!(!layer.lib.is_empty());
    }

    #[test]
    fn layer_set_construction() {
        assert_eq!(LayerSet::new(Vec::new(), "fg"), Err(LayerSetError::NoLayers));
        assert_eq!(
            LayerSet::new(vec![Layer::new(name("fg"))], "bg"),
            Err(LayerSetError::DefaultLayerNotFound("bg".into()))
        );
        assert_eq!(
            LayerSet::new(vec![Layer::new(name("fg")), Layer::new(name("fg"))], "fg"),
            Err(LayerSetError::DuplicateLayer("fg".into()))
        );
        assert_eq!(
            LayerSet::from_layers(vec![Layer::new(name("bg"))]),
            Err(LayerSetError::DefaultLayerNotFound(DEFAULT_LAYER_NAME.into()))
        );

        let layers = LayerSet::new(
            vec![Layer::new(name("bg")), Layer::new(name("fg")), Layer::new(name("sketch"))],
            "fg",
        )
        .unwrap();
        assert_eq!(layers.default_layer().name(), "fg");
        assert_eq!(layer_names(&layers), vec!["fg", "bg", "sketch"]);
        assert_eq!(layers.layer_order(), vec![name("fg"), name("bg"), name("sketch")]);
    }

    #[test]
    fn default_layer_set() {
        let layers = LayerSet::default();
        assert_eq!(layers.len(), 1);
        assert_eq!(layers.default_layer().name(), DEFAULT_LAYER_NAME);
        assert!(layers.default_layer().is_empty());
    }

    #[test]
    fn new_layer_and_remove() {
        let mut layers = LayerSet::default();
        layers.new_layer("background").unwrap().color = Some("1,0,0,1".parse().unwrap());
        assert_eq!(
            layers.new_layer("background").map(|_| ()),
            Err(NamingError::DuplicateLayer("background".into()))
        );
        assert!(layers.contains("background"));
        assert!(layers.get_or_create("sketch").unwrap().is_empty());
        assert!(layers.get_or_create("background").unwrap().color.is_some());
        assert_eq!(layer_names(&layers), vec![DEFAULT_LAYER_NAME, "background", "sketch"]);

        assert!(layers.remove(DEFAULT_LAYER_NAME).is_none());
        assert!(layers.remove("background").is_some());
        assert_eq!(layer_names(&layers), vec![DEFAULT_LAYER_NAME, "sketch"]);
    }

    #[test]
    fn rename_keeps_default() {
        let mut layers = LayerSet::default();
        layers.new_layer("bg").unwrap();
        layers.rename_layer("bg", "background", false).unwrap();
        assert_eq!(layers.default_layer().name(), DEFAULT_LAYER_NAME);

        layers.rename_layer(DEFAULT_LAYER_NAME, "foreground", false).unwrap();
        assert_eq!(layers.default_layer().name(), "foreground");
        assert_eq!(layer_names(&layers), vec!["foreground", "background"]);

        assert_eq!(
            layers.rename_layer("foreground", "background", false),
            Err(NamingError::DuplicateLayer("background".into()))
        );
        assert_eq!(
            layers.rename_layer("missing", "other", false),
            Err(NamingError::MissingLayer("missing".into()))
        );
        layers.rename_layer("background", "background", false).unwrap();
    }

    #[test]
    fn rename_over_default_replaces_it() {
        let mut layers = LayerSet::default();
        layers.new_layer("a").unwrap();
        layers.new_layer("b").unwrap().add_glyph(Glyph::new("x")).unwrap();
        layers.rename_layer("b", DEFAULT_LAYER_NAME, true).unwrap();

        assert_eq!(layer_names(&layers), vec![DEFAULT_LAYER_NAME, "a"]);
        assert!(layers.default_layer().contains_glyph("x"));
    }

    #[test]
    fn deserialize_checks_invariants() {
        let layer = Layer::from_glyphs(name("fg"), vec![Glyph::new("a")]).unwrap();
        let layers = LayerSet::new(vec![layer], "fg").unwrap();
        let mut buf = Vec::new();
        plist::to_writer_xml(&mut buf, &layers).unwrap();
        let back: LayerSet = plist::from_bytes(&buf).unwrap();
        assert_eq!(back, layers);

        let dupes = plist::Value::Array(vec![
            plist::Value::Dictionary(
                [("name".to_string(), plist::Value::String("fg".into()))].into_iter().collect(),
            ),
            plist::Value::Dictionary(
                [("name".to_string(), plist::Value::String("fg".into()))].into_iter().collect(),
            ),
        ]);
        assert!(plist::from_value::<LayerSet>(&dupes).is_err());
    }
}
