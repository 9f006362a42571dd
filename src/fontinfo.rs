use serde::{Deserialize, Serialize};

/// Font-wide naming, versioning and metric metadata.
///
/// The values are kept as they are given; nothing here is interpreted or
/// cross-checked by the document model. Fields follow the UFO `fontinfo.plist`
/// names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct FontInfo {
    // INFO: Keep this struct sorted alphabetically, serde serializes it in the order you see
    // here and Plist files should be sorted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ascender: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cap_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descender: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic_angle: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_type_head_created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_type_name_designer: Option<String>,
    #[serde(rename = "openTypeNameDesignerURL", skip_serializing_if = "Option::is_none")]
    pub open_type_name_designer_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_type_name_license: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_type_name_manufacturer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_type_name_version: Option<String>,
    #[serde(rename = "openTypeOS2VendorID", skip_serializing_if = "Option::is_none")]
    pub open_type_os2_vendor_id: Option<String>,
    #[serde(rename = "openTypeOS2WeightClass", skip_serializing_if = "Option::is_none")]
    pub open_type_os2_weight_class: Option<u32>,
    #[serde(rename = "openTypeOS2WidthClass", skip_serializing_if = "Option::is_none")]
    pub open_type_os2_width_class: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postscript_font_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postscript_full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postscript_is_fixed_pitch: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postscript_underline_position: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postscript_underline_thickness: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_map_family_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_map_style_name: Option<StyleMapStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trademark: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units_per_em: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_major: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_minor: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

impl FontInfo {
    /// Returns `true` if no field is set.
    pub fn is_empty(&self) -> bool {
        self == &FontInfo::default()
    }
}

/// Corresponds to the allowed values for [`FontInfo::style_map_style_name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum StyleMapStyle {
    #[serde(rename = "regular")]
    Regular,
    #[serde(rename = "italic")]
    Italic,
    #[serde(rename = "bold")]
    Bold,
    #[serde(rename = "bold italic")]
    BoldItalic,
}

#[cfg(test)]
mod tests {
    use serde_test::{assert_de_tokens_error, assert_tokens, Token};

    use super::*;

    #[test]
    fn only_set_fields_are_written() {
        let info = FontInfo {
            family_name: Some("Sample".into()),
            units_per_em: Some(1000.),
            style_map_style_name: Some(StyleMapStyle::BoldItalic),
            ..Default::default()
        };
        assert!(!info.is_empty());
        assert!(FontInfo::default().is_empty());

        assert_tokens(
            &info,
            &[
                Token::Struct { name: "FontInfo", len: 3 },
                Token::Str("familyName"),
                Token::Some,
                Token::Str("Sample"),
                Token::Str("styleMapStyleName"),
                Token::Some,
                Token::UnitVariant { name: "StyleMapStyle", variant: "bold italic" },
                Token::Str("unitsPerEm"),
                Token::Some,
                Token::F64(1000.),
                Token::StructEnd,
            ],
        );
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert_de_tokens_error::<FontInfo>(
            &[Token::Struct { name: "FontInfo", len: 1 }, Token::Str("familyNam")],
            "unknown field `familyNam`, expected one of `ascender`, `capHeight`, `copyright`, `descender`, `familyName`, `italicAngle`, `note`, `openTypeHeadCreated`, `openTypeNameDesigner`, `openTypeNameDesignerURL`, `openTypeNameLicense`, `openTypeNameManufacturer`, `openTypeNameVersion`, `openTypeOS2VendorID`, `openTypeOS2WeightClass`, `openTypeOS2WidthClass`, `postscriptFontName`, `postscriptFullName`, `postscriptIsFixedPitch`, `postscriptUnderlinePosition`, `postscriptUnderlineThickness`, `styleMapFamilyName`, `styleMapStyleName`, `styleName`, `trademark`, `unitsPerEm`, `versionMajor`, `versionMinor`, `xHeight`, `year`",
        );
    }
}
