//! Built-in color palettes and color picking for classification.

use crate::style::color::Color;
use crate::Result;

/// Reserved neutral fill for features with a missing value
pub const MISSING_COLOR: Color = Color::rgb(189, 189, 189);

/// Sequential ramp for continuous data (viridis)
const VIRIDIS: &[Color] = &[
    Color::rgb(0x44, 0x01, 0x54),
    Color::rgb(0x47, 0x2d, 0x7b),
    Color::rgb(0x3b, 0x52, 0x8b),
    Color::rgb(0x2c, 0x72, 0x8e),
    Color::rgb(0x21, 0x91, 0x8c),
    Color::rgb(0x28, 0xae, 0x80),
    Color::rgb(0x5e, 0xc9, 0x62),
    Color::rgb(0xad, 0xdc, 0x30),
    Color::rgb(0xfd, 0xe7, 0x25),
];

/// Distinct hues for categorical data (the d3 category10 set)
const CATEGORY10: &[Color] = &[
    Color::rgb(0x1f, 0x77, 0xb4),
    Color::rgb(0xff, 0x7f, 0x0e),
    Color::rgb(0x2c, 0xa0, 0x2c),
    Color::rgb(0xd6, 0x27, 0x28),
    Color::rgb(0x94, 0x67, 0xbd),
    Color::rgb(0x8c, 0x56, 0x4b),
    Color::rgb(0xe3, 0x77, 0xc2),
    Color::rgb(0x7f, 0x7f, 0x7f),
    Color::rgb(0xbc, 0xbd, 0x22),
    Color::rgb(0x17, 0xbe, 0xcf),
];

/// An ordered color sequence consumed by the classifier
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    name: String,
    colors: Vec<Color>,
}

impl Palette {
    /// Creates a palette from an ordered color sequence.
    ///
    /// Panics if `colors` is empty; a palette must contain at least one
    /// color.
    pub fn new(name: impl Into<String>, colors: Vec<Color>) -> Self {
        assert!(!colors.is_empty(), "palette must contain at least one color");
        Self {
            name: name.into(),
            colors,
        }
    }

    /// Creates a palette from hex color strings
    pub fn from_hex(name: impl Into<String>, hex: &[&str]) -> Result<Self> {
        let colors = hex
            .iter()
            .map(|h| Color::from_hex(h))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(name, colors))
    }

    /// The built-in sequential ramp used for continuous columns
    pub fn sequential() -> Self {
        Self::new("viridis", VIRIDIS.to_vec())
    }

    /// The built-in distinct-hue set used for categorical columns
    pub fn categorical() -> Self {
        Self::new("category10", CATEGORY10.to_vec())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// `k` colors spread evenly across the palette. When `k` exceeds the
    /// palette length the sequence repeats; that reuse is accepted and
    /// logged, not an error.
    pub fn pick(&self, k: usize) -> Vec<Color> {
        if k == 0 {
            return Vec::new();
        }
        if k == 1 {
            return vec![self.colors[0]];
        }
        if k <= self.colors.len() {
            (0..k)
                .map(|i| self.colors[i * (self.colors.len() - 1) / (k - 1)])
                .collect()
        } else {
            self.cycle(k)
        }
    }

    /// The first `k` colors in palette order, repeating on exhaustion
    pub fn cycle(&self, k: usize) -> Vec<Color> {
        if k > self.colors.len() {
            log::warn!(
                "palette '{}' has {} colors for {} classes; colors will repeat",
                self.name,
                self.colors.len(),
                k
            );
        }
        (0..k).map(|i| self.colors[i % self.colors.len()]).collect()
    }
}
