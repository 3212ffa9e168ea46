use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::{Result, ViewError};

/// RGBA color, serialized in CSS hex form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parses a `#rrggbb` or `#rrggbbaa` hex color
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        let invalid = || ViewError::InvalidColor(hex.to_string());

        let channel = |i: usize| {
            digits
                .get(i..i + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(invalid)
        };

        match digits.len() {
            6 => Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Self::new(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => Err(invalid()),
        }
    }

    /// CSS hex form; alpha is included only when not fully opaque
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Color::from_hex(&hex).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        let color = Color::from_hex("#3388ff").unwrap();
        assert_eq!(color, Color::rgb(0x33, 0x88, 0xff));
        assert_eq!(color.to_hex(), "#3388ff");

        let translucent = Color::from_hex("#3388ff80").unwrap();
        assert_eq!(translucent.a, 0x80);
        assert_eq!(translucent.to_hex(), "#3388ff80");
    }

    #[test]
    fn test_invalid_hex() {
        assert!(matches!(Color::from_hex("red"), Err(ViewError::InvalidColor(_))));
        assert!(matches!(Color::from_hex("#12345"), Err(ViewError::InvalidColor(_))));
        assert!(matches!(Color::from_hex("#gggggg"), Err(ViewError::InvalidColor(_))));
    }

    #[test]
    fn test_serde_as_hex_string() {
        let color = Color::rgb(0x1f, 0x77, 0xb4);
        let json = serde_json::to_string(&color).unwrap();
        assert_eq!(json, "\"#1f77b4\"");

        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, color);
    }
}
