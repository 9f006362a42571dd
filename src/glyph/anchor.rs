use serde::{Deserialize, Serialize};

use crate::{Color, Identifier, Plist};

/// A named position on a glyph, used to attach marks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    /// The x coordinate.
    pub x: f64,
    /// The y coordinate.
    pub y: f64,
    /// An arbitrary name for the anchor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The anchor's color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    identifier: Option<Identifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lib: Option<Plist>,
}

impl Anchor {
    /// Create a new anchor.
    pub fn new(
        x: f64,
        y: f64,
        name: Option<String>,
        color: Option<Color>,
        identifier: Option<Identifier>,
        lib: Option<Plist>,
    ) -> Self {
        let mut this = Self { x, y, name, color, identifier, lib: None };
        if let Some(lib) = lib {
            this.replace_lib(lib);
        }
        this
    }
}

impl_object_lib!(Anchor, "anchor");
