use serde::{Deserialize, Serialize};

use super::AffineTransform;
use crate::{Identifier, Name, Plist};

/// Another glyph inserted as part of the outline.
///
/// The base glyph is referred to by name only. It is never looked up, so a
/// component may refer to a glyph that does not exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// The name of the base glyph.
    pub base: Name,
    /// The placement of the base glyph.
    #[serde(default, skip_serializing_if = "AffineTransform::is_identity")]
    pub transform: AffineTransform,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    identifier: Option<Identifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lib: Option<Plist>,
}

impl Component {
    /// Create a new component.
    pub fn new(
        base: Name,
        transform: AffineTransform,
        identifier: Option<Identifier>,
        lib: Option<Plist>,
    ) -> Self {
        let mut this = Self { base, transform, identifier, lib: None };
        if let Some(lib) = lib {
            this.replace_lib(lib);
        }
        this
    }
}

impl_object_lib!(Component, "component");
