// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Keyboard diagram rendering.
//!
//! Rendering is split in two steps: [`layout_keyboard`] decides where
//! every key goes and how it is decorated, then [`Renderer`] paints that
//! layout onto an RGB canvas. Text goes through an injected [`Typeface`]
//! so the renderer never loads fonts itself.

pub mod font;
pub mod raster;

pub use font::{FontError, GlyphTypeface, FONT_DOWNLOAD_URL};

use image::{Rgb, RgbImage};
use thiserror::Error;

use crate::config::{Color, RenderConfig};
use crate::music::keyboard::{key_count, KeyKind};
use crate::music::{key_kind, ScaleMap, ScaleOctave, ScalePosition};

use raster::{fill_circle, fill_rect, stroke_rect};

/// Errors raised while rendering a keyboard
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("Fingering index {index} is past the end of a {len}-finger sequence")]
    FingeringIndex { index: usize, len: usize },
}

/// Text measurement and drawing capability
pub trait Typeface {
    /// Width in pixels of the inked extent of `text`
    fn text_width(&self, text: &str) -> u32;

    /// Draw `text` with the top-left of its ascender box at (x, y)
    fn draw_text(&self, canvas: &mut RgbImage, x: i32, y: i32, text: &str, color: Rgb<u8>);
}

/// Filled circle marking a tonic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    pub cx: i32,
    pub cy: i32,
    pub radius: u32,
    pub color: Color,
}

/// One key of the laid-out keyboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyShape {
    /// Chromatic position from the left edge
    pub position: u32,
    pub kind: KeyKind,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub fill: Color,
    /// Scale position, when the key is part of the highlighted run
    pub highlight: Option<ScalePosition>,
    pub marker: Option<Marker>,
    /// Finger number drawn on the key
    pub finger: Option<u8>,
}

/// Index into a fingering sequence for a highlighted key.
///
/// Naturals count through the run (`octave * 7 + degree`). Accidentals
/// use the degree alone, so a black key in the second octave repeats the
/// first octave's finger.
pub fn fingering_index(kind: KeyKind, degree: u8, scale_octave: u32) -> usize {
    match kind {
        KeyKind::Natural => scale_octave as usize * 7 + degree as usize,
        KeyKind::Accidental => degree as usize,
    }
}

/// Place every key and decide its fill, tonic marker and finger.
///
/// Naturals come first, then accidentals, which is also paint order.
pub fn layout_keyboard(
    config: &RenderConfig,
    scale: &ScaleMap,
    tonic: u8,
    fingering: &[u8],
) -> Result<Vec<KeyShape>, RenderError> {
    let palette = &config.palette;
    let top = config.label_height as i32;
    let total_keys = key_count(config.octaves);

    let mut naturals = Vec::new();
    let mut accidentals = Vec::new();
    let mut naturals_seen = 0i32;

    for position in 0..total_keys {
        let kind = key_kind(position);
        let highlight = scale.get(position).filter(|s| s.is_highlighted());

        let (x, width, height, fill) = match kind {
            KeyKind::Natural => {
                let x = naturals_seen * config.white_key_width as i32;
                naturals_seen += 1;
                let fill = if highlight.is_some() {
                    palette.natural_shade
                } else {
                    palette.natural_fill
                };
                (x, config.white_key_width, config.white_key_height, fill)
            }
            KeyKind::Accidental => {
                let x = naturals_seen * config.white_key_width as i32
                    - (config.black_key_width / 2) as i32;
                let fill = if highlight.is_some() {
                    palette.accidental_shade
                } else {
                    palette.accidental_fill
                };
                (x, config.black_key_width, config.black_key_height, fill)
            }
        };

        let mut shape = KeyShape {
            position,
            kind,
            x,
            y: top,
            width,
            height,
            fill,
            highlight,
            marker: None,
            finger: None,
        };

        if let Some(ScalePosition { degree, octave: ScaleOctave::InScale(octave) }) = highlight {
            if (position % 12) as u8 == tonic % 12 {
                shape.marker = Some(tonic_marker(config, &shape));
            }
            let index = fingering_index(kind, degree, octave);
            let finger = fingering.get(index).copied().ok_or(RenderError::FingeringIndex {
                index,
                len: fingering.len(),
            })?;
            shape.finger = Some(finger);
        }

        match kind {
            KeyKind::Natural => naturals.push(shape),
            KeyKind::Accidental => accidentals.push(shape),
        }
    }

    naturals.extend(accidentals);
    Ok(naturals)
}

fn tonic_marker(config: &RenderConfig, key: &KeyShape) -> Marker {
    let cx = key.x + (key.width / 2) as i32;
    match key.kind {
        KeyKind::Natural => Marker {
            cx,
            cy: key.y + key.height as i32 - config.marker_inset as i32,
            radius: config.natural_marker_radius,
            color: config.palette.natural_ink,
        },
        KeyKind::Accidental => Marker {
            cx,
            cy: key.y + config.marker_inset as i32,
            radius: config.accidental_marker_radius,
            color: config.palette.accidental_ink,
        },
    }
}

/// Paints keyboard diagrams with a shared config and typeface
pub struct Renderer<'a> {
    config: &'a RenderConfig,
    typeface: &'a dyn Typeface,
}

impl<'a> Renderer<'a> {
    pub fn new(config: &'a RenderConfig, typeface: &'a dyn Typeface) -> Self {
        Self { config, typeface }
    }

    /// Get the render configuration
    pub fn config(&self) -> &RenderConfig {
        self.config
    }

    /// Draw a captioned keyboard with the scale's highlighted run,
    /// tonic markers and finger numbers
    pub fn render(
        &self,
        scale: &ScaleMap,
        tonic: u8,
        fingering: &[u8],
        caption: &str,
    ) -> Result<RgbImage, RenderError> {
        let config = self.config;
        let layout = layout_keyboard(config, scale, tonic, fingering)?;

        let mut canvas = RgbImage::from_pixel(
            config.image_width(),
            config.image_height(),
            config.palette.background.rgb(),
        );

        let [label_x, label_y] = config.label_offset;
        self.typeface
            .draw_text(&mut canvas, label_x, label_y, caption, config.palette.label.rgb());

        for key in &layout {
            self.paint_key(&mut canvas, key);
        }

        Ok(canvas)
    }

    fn paint_key(&self, canvas: &mut RgbImage, key: &KeyShape) {
        let config = self.config;
        let (x1, y1) = (key.x + key.width as i32, key.y + key.height as i32);

        fill_rect(canvas, key.x, key.y, x1, y1, key.fill.rgb());
        stroke_rect(
            canvas,
            key.x,
            key.y,
            x1,
            y1,
            config.outline_width,
            config.palette.outline.rgb(),
        );

        if let Some(marker) = key.marker {
            fill_circle(canvas, marker.cx, marker.cy, marker.radius, marker.color.rgb());
        }

        if let Some(finger) = key.finger {
            let (text_y, ink) = match key.kind {
                KeyKind::Natural => (config.natural_text_y, config.palette.natural_ink),
                KeyKind::Accidental => (config.accidental_text_y, config.palette.accidental_ink),
            };
            let text = finger.to_string();
            let text_width = self.typeface.text_width(&text) as i32;
            let text_x = key.x + (key.width as i32 - text_width).div_euclid(2);
            self.typeface.draw_text(canvas, text_x, text_y, &text, ink.rgb());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::music::{build_scale, ScaleType};
    use std::cell::RefCell;

    const C_MAJOR_RH: [u8; 15] = [1, 2, 3, 1, 2, 3, 4, 1, 2, 3, 1, 2, 3, 4, 5];
    const D_MAJOR_RH: [u8; 15] = [1, 2, 3, 1, 2, 3, 4, 1, 2, 3, 1, 2, 3, 4, 5];

    /// Draws a solid block per character and records every call
    #[derive(Default)]
    struct BlockTypeface {
        drawn: RefCell<Vec<(i32, i32, String)>>,
    }

    impl Typeface for BlockTypeface {
        fn text_width(&self, text: &str) -> u32 {
            text.chars().count() as u32 * 10
        }

        fn draw_text(&self, canvas: &mut RgbImage, x: i32, y: i32, text: &str, color: Rgb<u8>) {
            let width = self.text_width(text) as i32;
            fill_rect(canvas, x, y, x + width - 1, y + 9, color);
            self.drawn.borrow_mut().push((x, y, text.to_string()));
        }
    }

    fn key(layout: &[KeyShape], position: u32) -> &KeyShape {
        layout.iter().find(|k| k.position == position).unwrap()
    }

    #[test]
    fn test_layout_geometry() {
        let config = RenderConfig::default();
        let scale = build_scale("C", &ScaleType::Major.interval_set(), 3).unwrap();
        let layout = layout_keyboard(&config, &scale, 0, &C_MAJOR_RH).unwrap();

        assert_eq!(layout.len(), 36);
        assert!(layout[..21].iter().all(|k| k.kind == KeyKind::Natural));
        assert!(layout[21..].iter().all(|k| k.kind == KeyKind::Accidental));

        // C, D, E at 0, 40, 80; C# straddles C and D
        assert_eq!(key(&layout, 0).x, 0);
        assert_eq!(key(&layout, 2).x, 40);
        assert_eq!(key(&layout, 4).x, 80);
        assert_eq!(key(&layout, 1).x, 28);
        assert_eq!(key(&layout, 6).x, 148);
        assert_eq!(key(&layout, 35).x, 800);

        assert_eq!(key(&layout, 0).y, 40);
        assert_eq!(key(&layout, 0).height, 200);
        assert_eq!(key(&layout, 1).width, 24);
        assert_eq!(key(&layout, 1).height, 120);
    }

    #[test]
    fn test_highlight_policy() {
        let config = RenderConfig::default();
        let palette = &config.palette;
        let scale = build_scale("C", &ScaleType::Major.interval_set(), 3).unwrap();
        let layout = layout_keyboard(&config, &scale, 0, &C_MAJOR_RH).unwrap();

        assert_eq!(key(&layout, 0).fill, palette.natural_shade);
        assert_eq!(key(&layout, 23).fill, palette.natural_shade);
        // Closing tonic
        assert_eq!(key(&layout, 24).fill, palette.natural_shade);
        assert_eq!(key(&layout, 26).fill, palette.natural_fill);
        assert!(key(&layout, 26).finger.is_none());
        // Black keys are outside C major
        assert_eq!(key(&layout, 1).fill, palette.accidental_fill);

        let highlighted = layout.iter().filter(|k| k.highlight.is_some()).count();
        assert_eq!(highlighted, 15);
    }

    #[test]
    fn test_tonic_markers() {
        let config = RenderConfig::default();
        let scale = build_scale("C", &ScaleType::Major.interval_set(), 3).unwrap();
        let layout = layout_keyboard(&config, &scale, 0, &C_MAJOR_RH).unwrap();

        let marked: Vec<u32> = layout
            .iter()
            .filter(|k| k.marker.is_some())
            .map(|k| k.position)
            .collect();
        assert_eq!(marked, vec![0, 12, 24]);

        let marker = key(&layout, 12).marker.unwrap();
        assert_eq!(marker.cx, 7 * 40 + 20);
        assert_eq!(marker.cy, 40 + 200 - 20);
        assert_eq!(marker.radius, 8);
        assert_eq!(marker.color, config.palette.natural_ink);
    }

    #[test]
    fn test_accidental_tonic_marker() {
        let config = RenderConfig::default();
        let scale = build_scale("F#", &ScaleType::Major.interval_set(), 3).unwrap();
        let tonic = 6;
        let fingering = [2, 3, 4, 1, 2, 3, 1, 2, 3, 4, 1, 2, 3, 1, 2];
        let layout = layout_keyboard(&config, &scale, tonic, &fingering).unwrap();

        let marker = key(&layout, 6).marker.unwrap();
        assert_eq!(marker.cx, key(&layout, 6).x + 12);
        assert_eq!(marker.cy, 40 + 20);
        assert_eq!(marker.radius, 6);
        assert_eq!(marker.color, config.palette.accidental_ink);
        assert_eq!(key(&layout, 6).fill, config.palette.accidental_shade);
        // F# two octaves up closes the run; the F# above that is off the keyboard
        assert!(key(&layout, 30).marker.is_some());
    }

    #[test]
    fn test_natural_fingering_counts_through_octaves() {
        let config = RenderConfig::default();
        let scale = build_scale("C", &ScaleType::Major.interval_set(), 3).unwrap();
        let layout = layout_keyboard(&config, &scale, 0, &C_MAJOR_RH).unwrap();

        assert_eq!(key(&layout, 0).finger, Some(1));
        assert_eq!(key(&layout, 5).finger, Some(1));
        assert_eq!(key(&layout, 11).finger, Some(4));
        assert_eq!(key(&layout, 12).finger, Some(1));
        assert_eq!(key(&layout, 23).finger, Some(4));
        assert_eq!(key(&layout, 24).finger, Some(5));
    }

    #[test]
    fn test_accidental_fingering_uses_degree_only() {
        assert_eq!(fingering_index(KeyKind::Natural, 2, 1), 9);
        assert_eq!(fingering_index(KeyKind::Accidental, 2, 1), 2);
        assert_eq!(fingering_index(KeyKind::Accidental, 6, 0), 6);

        // D major: F# (degree 2) and C# (degree 6) in the second octave
        // read the first octave's fingers
        let config = RenderConfig::default();
        let scale = build_scale("D", &ScaleType::Major.interval_set(), 3).unwrap();
        let fingering = [1, 2, 3, 1, 2, 3, 4, 5, 5, 5, 5, 5, 5, 5, 5];
        let layout = layout_keyboard(&config, &scale, 2, &fingering).unwrap();

        assert_eq!(key(&layout, 6).finger, Some(3));
        assert_eq!(key(&layout, 18).finger, Some(3));
        assert_eq!(key(&layout, 25).finger, Some(4));
        // Naturals in the second octave read from index 7 onward
        assert_eq!(key(&layout, 14).finger, Some(5));
    }

    #[test]
    fn test_short_fingering_is_an_error() {
        let config = RenderConfig::default();
        let scale = build_scale("C", &ScaleType::Major.interval_set(), 3).unwrap();
        let err = layout_keyboard(&config, &scale, 0, &C_MAJOR_RH[..10]).unwrap_err();
        assert_eq!(err, RenderError::FingeringIndex { index: 10, len: 10 });
    }

    #[test]
    fn test_render_paints_layout() {
        let config = RenderConfig::default();
        let typeface = BlockTypeface::default();
        let renderer = Renderer::new(&config, &typeface);
        let scale = build_scale("C", &ScaleType::Major.interval_set(), 3).unwrap();

        let image = renderer.render(&scale, 0, &C_MAJOR_RH, "C major for RH").unwrap();
        assert_eq!(image.dimensions(), (840, 240));

        let shade = config.palette.natural_shade.rgb();
        let black = Rgb([0, 0, 0]);
        let white = Rgb([255, 255, 255]);

        // Highlighted D, between its outline and the finger digit
        assert_eq!(*image.get_pixel(60, 190), shade);
        // Unhighlighted D two octaves up
        assert_eq!(*image.get_pixel(14 * 40 + 20 + 40, 190), white);
        // Outline on the left edge of the first key
        assert_eq!(*image.get_pixel(0, 100), black);
        // Black key body above the marker/digit rows
        assert_eq!(*image.get_pixel(40, 45), black);
        // Tonic marker center on the first C
        assert_eq!(*image.get_pixel(20, 220), black);
        // Label band background
        assert_eq!(*image.get_pixel(5, 20), white);

        let drawn = typeface.drawn.borrow();
        assert_eq!(drawn[0], (100, 2, "C major for RH".to_string()));
        // Caption plus one digit per highlighted key
        assert_eq!(drawn.len(), 16);
        // First digit centered on the first C
        assert_eq!(drawn[1], (15, 170, "1".to_string()));
    }

    #[test]
    fn test_render_accidental_digits() {
        let config = RenderConfig::default();
        let typeface = BlockTypeface::default();
        let renderer = Renderer::new(&config, &typeface);
        let scale = build_scale("D", &ScaleType::Major.interval_set(), 3).unwrap();

        renderer.render(&scale, 2, &D_MAJOR_RH, "D major for RH").unwrap();

        let drawn = typeface.drawn.borrow();
        // F#: x = 4 * 40 - 12 = 148, centered in 24 px
        assert!(drawn.contains(&(155, 120, "3".to_string())));
    }
}
