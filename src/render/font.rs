// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! TrueType text backend built on `ab_glyph`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ab_glyph::{point, Font, FontVec, Glyph, OutlinedGlyph, PxScale, ScaleFont};
use image::{Rgb, RgbImage};
use thiserror::Error;

use super::raster::blend_pixel;
use super::Typeface;

/// Where to get the default font
pub const FONT_DOWNLOAD_URL: &str = "https://github.com/google/fonts/tree/main/ofl/libertinusmath";

/// Errors raised while loading a font
#[derive(Debug, Error)]
pub enum FontError {
    #[error("Font {path:?} is missing. Download the ttf from: {url}", url = FONT_DOWNLOAD_URL)]
    Missing { path: PathBuf, source: io::Error },
    #[error("Font {path:?} is not a valid TrueType font. Download the ttf from: {url}", url = FONT_DOWNLOAD_URL)]
    Invalid { path: PathBuf },
}

/// A loaded font at a fixed pixel size
pub struct GlyphTypeface {
    font: FontVec,
    scale: PxScale,
}

impl GlyphTypeface {
    /// Load a font file, sized in pixels per em
    pub fn load<P: AsRef<Path>>(path: P, size: f32) -> Result<Self, FontError> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|source| FontError::Missing {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(data, size).ok_or_else(|| FontError::Invalid {
            path: path.to_path_buf(),
        })
    }

    /// Parse font data held in memory
    pub fn from_bytes(data: Vec<u8>, size: f32) -> Option<Self> {
        let font = FontVec::try_from_vec(data).ok()?;
        // PxScale is the ascent-to-descent height, not the em size
        let units_per_em = font.units_per_em().unwrap_or(1000.0);
        let scale = PxScale::from(size * font.height_unscaled() / units_per_em);
        Some(Self { font, scale })
    }

    /// Lay out `text` on one line with the ascender top at y = 0
    fn outline(&self, text: &str) -> Vec<OutlinedGlyph> {
        let scaled = self.font.as_scaled(self.scale);
        let mut caret = 0.0f32;
        let mut previous = None;
        let mut glyphs: Vec<Glyph> = Vec::with_capacity(text.len());

        for c in text.chars() {
            let id = scaled.glyph_id(c);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }
            glyphs.push(id.with_scale_and_position(self.scale, point(caret, scaled.ascent())));
            caret += scaled.h_advance(id);
            previous = Some(id);
        }

        glyphs
            .into_iter()
            .filter_map(|glyph| self.font.outline_glyph(glyph))
            .collect()
    }
}

impl Typeface for GlyphTypeface {
    fn text_width(&self, text: &str) -> u32 {
        let outlined = self.outline(text);
        let min_x = outlined.iter().map(|g| g.px_bounds().min.x).fold(f32::MAX, f32::min);
        let max_x = outlined.iter().map(|g| g.px_bounds().max.x).fold(f32::MIN, f32::max);
        if outlined.is_empty() {
            0
        } else {
            (max_x - min_x).max(0.0).round() as u32
        }
    }

    fn draw_text(&self, canvas: &mut RgbImage, x: i32, y: i32, text: &str, color: Rgb<u8>) {
        for glyph in self.outline(text) {
            let bounds = glyph.px_bounds();
            let left = x + bounds.min.x as i32;
            let top = y + bounds.min.y as i32;
            glyph.draw(|gx, gy, coverage| {
                blend_pixel(canvas, left + gx as i32, top + gy as i32, color, coverage);
            });
        }
    }
}
