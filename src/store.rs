//! Loading and saving fonts.
//!
//! The document model does not define a file format. Anything that can turn a
//! path into a [`Font`] and back implements [`Storage`]; [`PlistStore`] is a
//! simple one that keeps a whole font in a single property list file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LoadError, SaveError};
use crate::Font;

static DEFAULT_CREATOR: &str = "org.fontdoc";
const FORMAT_VERSION: u32 = 1;
const FORMAT_VERSION_MINOR: u32 = 0;

/// Something that can load and save fonts.
///
/// Errors are opaque to the document model and are returned unchanged.
pub trait Storage {
    /// Load the font at `path`.
    fn load(&self, path: &Path) -> Result<Font, LoadError>;
    /// Save `font` to `path`.
    fn save(&self, font: &Font, path: &Path) -> Result<(), SaveError>;
}

impl<S: Storage + ?Sized> Storage for &S {
    fn load(&self, path: &Path) -> Result<Font, LoadError> {
        (**self).load(path)
    }

    fn save(&self, font: &Font, path: &Path) -> Result<(), SaveError> {
        (**self).save(font, path)
    }
}

/// A [`Storage`] that writes the whole font to one property list file.
///
/// Loading accepts both XML and binary property lists. Every invariant of the
/// document model is checked while loading.
///
/// # Examples
///
/// ```no_run
/// use fontdoc::{Font, PlistStore};
///
/// let store = PlistStore::new().xml(false);
/// let font = Font::new();
/// font.save_with(&store, "font.plist").expect("failed to save");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlistStore {
    xml: bool,
}

impl PlistStore {
    /// Returns a store that writes XML property lists.
    pub fn new() -> Self {
        PlistStore::default()
    }

    /// Choose between XML (the default) and binary output.
    pub fn xml(mut self, xml: bool) -> Self {
        self.xml = xml;
        self
    }
}

impl Default for PlistStore {
    fn default() -> Self {
        PlistStore { xml: true }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DocumentRef<'a> {
    creator: &'a str,
    format_version: u32,
    #[serde(skip_serializing_if = "is_zero")]
    format_version_minor: u32,
    font: &'a Font,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Document {
    #[serde(default)]
    creator: Option<String>,
    format_version: u32,
    #[serde(default)]
    format_version_minor: u32,
    font: Font,
}

fn is_zero(v: &u32) -> bool {
    *v == 0
}

impl Storage for PlistStore {
    fn load(&self, path: &Path) -> Result<Font, LoadError> {
        let doc: Document =
            plist::from_file(path).map_err(|error| LoadError::new(path, error))?;
        if doc.format_version != FORMAT_VERSION {
            return Err(LoadError::new(
                path,
                format!("unsupported format version {}", doc.format_version),
            ));
        }
        if doc.format_version_minor > FORMAT_VERSION_MINOR {
            log::warn!(
                "'{}' has format version {}.{}, newer than {FORMAT_VERSION}.{FORMAT_VERSION_MINOR}; \
                 unknown data may be lost on save",
                path.display(),
                doc.format_version,
                doc.format_version_minor,
            );
        }
        log::debug!(
            "loaded '{}' ({} layers) written by {}",
            path.display(),
            doc.font.layers.len(),
            doc.creator.as_deref().unwrap_or("an unknown creator"),
        );
        Ok(doc.font)
    }

    fn save(&self, font: &Font, path: &Path) -> Result<(), SaveError> {
        let doc = DocumentRef {
            creator: DEFAULT_CREATOR,
            format_version: FORMAT_VERSION,
            format_version_minor: FORMAT_VERSION_MINOR,
            font,
        };
        let mut buf = Vec::new();
        let written = if self.xml {
            plist::to_writer_xml(&mut buf, &doc)
        } else {
            plist::to_writer_binary(&mut buf, &doc)
        };
        written.map_err(|error| SaveError::new(path, error))?;

        // write next to the target, then move into place
        let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = path.with_file_name(tmp_name);
        fs::write(&tmp_path, &buf).map_err(|error| SaveError::new(path, error))?;
        fs::rename(&tmp_path, path).map_err(|error| {
            let _ = fs::remove_file(&tmp_path);
            SaveError::new(path, error)
        })?;
        log::debug!("saved '{}' ({} bytes)", path.display(), buf.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::Glyph;

    fn sample() -> Font {
        let mut font = Font::new();
        font.font_info.family_name = Some("Sample".into());
        font.add_glyph(Glyph::new("a")).unwrap();
        font.new_layer("background").unwrap().add_glyph(Glyph::new("a")).unwrap();
        font
    }

    #[test]
    fn xml_and_binary() {
        let dir = tempfile::tempdir().unwrap();
        let font = sample();
        for xml in [true, false] {
            let path = dir.path().join(format!("font-{xml}.plist"));
            let store = PlistStore::new().xml(xml);
            font.save_with(&store, &path).unwrap();
            assert_eq!(Font::load_with(&store, &path).unwrap(), font);
        }
        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert!(names.iter().all(|n| !n.ends_with(".tmp")));
    }

    #[test]
    fn overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("font.plist");
        let store = PlistStore::new();
        Font::new().save_with(&store, &path).unwrap();
        let font = sample();
        font.save_with(&store, &path).unwrap();
        assert_eq!(Font::load_with(&store, &path).unwrap(), font);
    }

    #[test]
    fn missing_file() {
        let err = Font::load_with(&PlistStore::new(), "/does/not/exist.plist").unwrap_err();
        assert_eq!(err.path, Path::new("/does/not/exist.plist"));
    }

    #[test]
    fn rejects_other_versions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("font.plist");
        let doc = DocumentRef {
            creator: "test",
            format_version: 2,
            format_version_minor: 0,
            font: &Font::new(),
        };
        plist::to_file_xml(&path, &doc).unwrap();
        let err = Font::load_with(&PlistStore::new(), &path).unwrap_err();
        assert_eq!(err.source.to_string(), "unsupported format version 2");
    }

    #[test]
    fn rejects_broken_invariants() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("font.plist");
        // two layers with the same name
        let layer = plist::Value::Dictionary(
            [("name".to_string(), plist::Value::String("public.default".into()))]
                .into_iter()
                .collect(),
        );
        let font = plist::Value::Dictionary(
            [("layers".to_string(), plist::Value::Array(vec![layer.clone(), layer]))]
                .into_iter()
                .collect(),
        );
        let doc = plist::Value::Dictionary(
            [
                ("formatVersion".to_string(), plist::Value::Integer(1.into())),
                ("font".to_string(), font),
            ]
            .into_iter()
            .collect(),
        );
        doc.to_file_xml(&path).unwrap();
        assert!(Font::load_with(&PlistStore::new(), &path).is_err());
    }
}
