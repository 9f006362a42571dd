use std::fmt;
use std::str::FromStr;

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::error::InvalidColorString;

/// A Plist dictionary, used for the free-form `lib` of fonts, layers, glyphs
/// and the objects inside them.
pub type Plist = plist::Dictionary;

/// A color in RGBA (Red-Green-Blue-Alpha) format.
///
/// Colors are written as four comma-separated numbers, `"r,g,b,a"`, each in
/// the range 0 to 1 inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    red: f64,
    green: f64,
    blue: f64,
    alpha: f64,
}

impl Color {
    /// Create a color, returning an error if any channel is outside `0.0..=1.0`.
    pub fn new(red: f64, green: f64, blue: f64, alpha: f64) -> Result<Self, InvalidColorString> {
        if [red, green, blue, alpha].iter().all(|v| (0.0..=1.0).contains(v)) {
            Ok(Color { red, green, blue, alpha })
        } else {
            Err(InvalidColorString::new(format!("{red},{green},{blue},{alpha}")))
        }
    }

    /// The channels as a `(red, green, blue, alpha)` tuple.
    pub fn channels(&self) -> (f64, f64, f64, f64) {
        (self.red, self.green, self.blue, self.alpha)
    }

    /// The `"r,g,b,a"` form of this color.
    ///
    /// Channels are rounded to three decimal places and trailing zeros are
    /// dropped, so `0.5` is written `0.5` and `1.0` is written `1`.
    pub fn to_rgba_string(&self) -> String {
        let (r, g, b, a) = self.channels();
        format!("{},{},{},{}", short(r), short(g), short(b), short(a))
    }
}

fn short(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    let s = format!("{rounded:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() || s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

impl FromStr for Color {
    type Err = InvalidColorString;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || InvalidColorString::new(s.to_owned());
        let channels = s
            .split(',')
            .map(|v| v.trim().parse::<f64>().map_err(|_| bad()))
            .collect::<Result<Vec<_>, _>>()?;
        match channels.as_slice() {
            &[r, g, b, a] => Color::new(r, g, b, a).map_err(|_| bad()),
            _ => Err(bad()),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rgba_string())
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_rgba_string())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Color, D::Error>
    where
        D: Deserializer<'de>,
    {
        let string = String::deserialize(deserializer)?;
        Color::from_str(&string).map_err(serde::de::Error::custom)
    }
}
