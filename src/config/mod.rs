// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration for keyboard rendering.
//!
//! This module provides the keyboard geometry, color palette, font
//! settings, and the fingering tables consumed by the renderer.

pub mod fingering;

pub use fingering::{FingeringError, FingeringTable, Hand, BUILTIN_FINGERINGS, MIN_FINGERING_LENGTH};

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::Rgb;
use serde::{Deserialize, Serialize};

/// An RGB color written as "#rrggbb" in config files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(pub [u8; 3]);

impl Color {
    pub const WHITE: Color = Color([0xff, 0xff, 0xff]);
    pub const BLACK: Color = Color([0x00, 0x00, 0x00]);

    /// Parse "#rrggbb" (the leading '#' is optional)
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Color([channel(0)?, channel(2)?, channel(4)?]))
    }

    /// Convert to an image pixel
    pub fn rgb(self) -> Rgb<u8> {
        Rgb(self.0)
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Color::from_hex(&value).ok_or_else(|| format!("invalid color {:?}, expected #rrggbb", value))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0[0], self.0[1], self.0[2])
    }
}

/// Colors used when drawing a keyboard
///
/// Shades follow colorbrewer2 YlGn (n=5).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Palette {
    /// Fill for highlighted natural keys
    #[serde(default = "default_natural_shade")]
    pub natural_shade: Color,
    /// Fill for highlighted accidental keys
    #[serde(default = "default_accidental_shade")]
    pub accidental_shade: Color,
    /// Fill for natural keys outside the highlighted run
    #[serde(default = "default_white")]
    pub natural_fill: Color,
    /// Fill for accidental keys outside the highlighted run
    #[serde(default = "default_black")]
    pub accidental_fill: Color,
    /// Key outline
    #[serde(default = "default_black")]
    pub outline: Color,
    /// Tonic marker and fingering digits on naturals
    #[serde(default = "default_black")]
    pub natural_ink: Color,
    /// Tonic marker and fingering digits on accidentals
    #[serde(default = "default_white")]
    pub accidental_ink: Color,
    /// Caption text
    #[serde(default = "default_black")]
    pub label: Color,
    /// Image background
    #[serde(default = "default_white")]
    pub background: Color,
}

fn default_natural_shade() -> Color {
    Color([0xc2, 0xe6, 0x99])
}
fn default_accidental_shade() -> Color {
    Color([0x31, 0xa3, 0x54])
}
fn default_white() -> Color {
    Color::WHITE
}
fn default_black() -> Color {
    Color::BLACK
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            natural_shade: default_natural_shade(),
            accidental_shade: default_accidental_shade(),
            natural_fill: default_white(),
            accidental_fill: default_black(),
            outline: default_black(),
            natural_ink: default_black(),
            accidental_ink: default_white(),
            label: default_black(),
            background: default_white(),
        }
    }
}

/// Keyboard geometry and text placement
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RenderConfig {
    /// Octaves drawn on the keyboard
    #[serde(default = "default_octaves")]
    pub octaves: u32,
    #[serde(default = "default_white_key_width")]
    pub white_key_width: u32,
    #[serde(default = "default_white_key_height")]
    pub white_key_height: u32,
    #[serde(default = "default_black_key_width")]
    pub black_key_width: u32,
    #[serde(default = "default_black_key_height")]
    pub black_key_height: u32,
    /// Height of the caption band above the keys
    #[serde(default = "default_label_height")]
    pub label_height: u32,
    /// Top-left corner of the caption
    #[serde(default = "default_label_offset")]
    pub label_offset: [i32; 2],
    /// Top of fingering digits drawn on naturals
    #[serde(default = "default_natural_text_y")]
    pub natural_text_y: i32,
    /// Top of fingering digits drawn on accidentals
    #[serde(default = "default_accidental_text_y")]
    pub accidental_text_y: i32,
    #[serde(default = "default_natural_marker_radius")]
    pub natural_marker_radius: u32,
    #[serde(default = "default_accidental_marker_radius")]
    pub accidental_marker_radius: u32,
    /// Distance from the key end to the tonic marker center
    #[serde(default = "default_marker_inset")]
    pub marker_inset: u32,
    #[serde(default = "default_outline_width")]
    pub outline_width: u32,
    /// TrueType font used for captions and fingerings
    #[serde(default = "default_font_path")]
    pub font_path: PathBuf,
    /// Font size in pixels per em
    #[serde(default = "default_font_size")]
    pub font_size: f32,
    #[serde(default)]
    pub palette: Palette,
}

fn default_octaves() -> u32 {
    3
}
fn default_white_key_width() -> u32 {
    40
}
fn default_white_key_height() -> u32 {
    200
}
fn default_black_key_width() -> u32 {
    24
}
fn default_black_key_height() -> u32 {
    120
}
fn default_label_height() -> u32 {
    40
}
fn default_label_offset() -> [i32; 2] {
    [100, 2]
}
fn default_natural_text_y() -> i32 {
    170
}
fn default_accidental_text_y() -> i32 {
    120
}
fn default_natural_marker_radius() -> u32 {
    8
}
fn default_accidental_marker_radius() -> u32 {
    6
}
fn default_marker_inset() -> u32 {
    20
}
fn default_outline_width() -> u32 {
    2
}
fn default_font_path() -> PathBuf {
    PathBuf::from("LibertinusMath-Regular.ttf")
}
fn default_font_size() -> f32 {
    32.0
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            octaves: default_octaves(),
            white_key_width: default_white_key_width(),
            white_key_height: default_white_key_height(),
            black_key_width: default_black_key_width(),
            black_key_height: default_black_key_height(),
            label_height: default_label_height(),
            label_offset: default_label_offset(),
            natural_text_y: default_natural_text_y(),
            accidental_text_y: default_accidental_text_y(),
            natural_marker_radius: default_natural_marker_radius(),
            accidental_marker_radius: default_accidental_marker_radius(),
            marker_inset: default_marker_inset(),
            outline_width: default_outline_width(),
            font_path: default_font_path(),
            font_size: default_font_size(),
            palette: Palette::default(),
        }
    }
}

impl RenderConfig {
    /// Load a render configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        Self::from_yaml(&contents)
    }

    /// Parse a render configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse render configuration")
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize render configuration to YAML")
    }

    /// Image width in pixels
    pub fn image_width(&self) -> u32 {
        crate::music::keyboard::natural_count(self.octaves) * self.white_key_width
    }

    /// Image height in pixels
    pub fn image_height(&self) -> u32 {
        self.label_height + self.white_key_height
    }
}
