use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single HSV sample in the 8-bit convention: hue in `[0, 180)`,
/// saturation and value in `[0, 255]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hsv {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

impl Hsv {
    pub const fn new(h: u8, s: u8, v: u8) -> Self {
        Self { h, s, v }
    }
}

/// Inclusive lower/upper HSV bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HsvRange {
    pub lower: Hsv,
    pub upper: Hsv,
}

impl HsvRange {
    pub const fn new(lower: Hsv, upper: Hsv) -> Self {
        Self { lower, upper }
    }

    pub fn contains(&self, hsv: Hsv) -> bool {
        (self.lower.h..=self.upper.h).contains(&hsv.h)
            && (self.lower.s..=self.upper.s).contains(&hsv.s)
            && (self.lower.v..=self.upper.v).contains(&hsv.v)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown color: {0}")]
pub struct ColorParseError(pub String);

/// Named target colors the locator can track.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorPreset {
    Red,
    Green,
    Blue,
}

impl ColorPreset {
    pub const ALL: &[ColorPreset] = &[ColorPreset::Red, ColorPreset::Green, ColorPreset::Blue];

    pub fn hsv_range(self) -> HsvRange {
        match self {
            ColorPreset::Green => HsvRange::new(Hsv::new(50, 80, 40), Hsv::new(70, 255, 255)),
            ColorPreset::Blue => HsvRange::new(Hsv::new(110, 80, 40), Hsv::new(130, 255, 255)),
            ColorPreset::Red => HsvRange::new(Hsv::new(0, 80, 40), Hsv::new(10, 255, 255)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ColorPreset::Red => "red",
            ColorPreset::Green => "green",
            ColorPreset::Blue => "blue",
        }
    }
}

impl fmt::Display for ColorPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorPreset {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColorPreset::ALL
            .iter()
            .copied()
            .find(|preset| preset.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ColorParseError(s.to_string()))
    }
}
