// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Integration tests for pianoscales
//!
//! These tests run the scale model, fingering table, renderer and file
//! output together through the public API.

use std::fs;

use image::{Rgb, RgbImage};
use pianoscales::generate::{HARMONIC_MINOR_ROOTS, MAJOR_ROOTS};
use pianoscales::render::FontError;
use pianoscales::{
    build_scale, FingeringTable, Generator, GlyphTypeface, Hand, RenderConfig, Renderer,
    ScaleType, Typeface,
};
use tempfile::tempdir;

/// Typeface stand-in that draws a 10x10 block per character
struct BlockTypeface;

impl Typeface for BlockTypeface {
    fn text_width(&self, text: &str) -> u32 {
        text.chars().count() as u32 * 10
    }

    fn draw_text(&self, canvas: &mut RgbImage, x: i32, y: i32, text: &str, color: Rgb<u8>) {
        let width = self.text_width(text) as i32;
        for py in y.max(0)..(y + 10).min(canvas.height() as i32) {
            for px in x.max(0)..(x + width).min(canvas.width() as i32) {
                canvas.put_pixel(px as u32, py as u32, color);
            }
        }
    }
}

/// Generating C major writes one non-empty PNG per hand
#[test]
fn test_c_major_end_to_end() {
    let dir = tempdir().unwrap();
    let output_dir = dir.path().join("output");
    let config = RenderConfig::default();
    let fingerings = FingeringTable::builtin().unwrap();

    let generator = Generator::new(&output_dir, &config, &fingerings, &BlockTypeface);
    let files = generator.generate_scale("C", ScaleType::Major).unwrap();

    assert_eq!(files.len(), 2);
    assert_eq!(files[0], output_dir.join("c_major_rh.png"));
    assert_eq!(files[1], output_dir.join("c_major_lh.png"));

    for file in &files {
        assert!(fs::metadata(file).unwrap().len() > 0);
        let image = image::open(file).unwrap().to_rgb8();
        assert_eq!(image.dimensions(), (840, 240));
        // First C is highlighted
        assert_eq!(*image.get_pixel(20, 100), config.palette.natural_shade.rgb());
    }
}

/// The right and left hand diagrams differ only in their fingerings
#[test]
fn test_hands_share_highlighting() {
    let config = RenderConfig::default();
    let fingerings = FingeringTable::builtin().unwrap();
    let renderer = Renderer::new(&config, &BlockTypeface);
    let scale = build_scale("G", &ScaleType::Major.interval_set(), config.octaves).unwrap();

    let rh = renderer
        .render(&scale, 7, fingerings.get(ScaleType::Major, Hand::Right, "G").unwrap(), "RH")
        .unwrap();
    let lh = renderer
        .render(&scale, 7, fingerings.get(ScaleType::Major, Hand::Left, "G").unwrap(), "LH")
        .unwrap();

    // F# in the first G octave (position 18), inside the black key body
    let fs_x = 11 * 40 - 12 + 12;
    assert_eq!(*rh.get_pixel(fs_x, 80), config.palette.accidental_shade.rgb());
    assert_eq!(*lh.get_pixel(fs_x, 80), config.palette.accidental_shade.rgb());
    // Leading F# before the first G stays black
    let leading_fs_x = 4 * 40 - 12 + 12;
    assert_eq!(*rh.get_pixel(leading_fs_x, 80), Rgb([0, 0, 0]));
}

/// Every published scale renders, and the whole batch lands on disk
#[test]
fn test_generate_all() {
    let dir = tempdir().unwrap();
    let config = RenderConfig::default();
    let fingerings = FingeringTable::builtin().unwrap();

    let generator = Generator::new(dir.path(), &config, &fingerings, &BlockTypeface);
    let summary = generator.generate_all().unwrap();

    assert_eq!(summary.scales, MAJOR_ROOTS.len() + HARMONIC_MINOR_ROOTS.len());
    assert_eq!(summary.files.len(), 48);
    for file in &summary.files {
        assert!(file.exists(), "{:?}", file);
    }
    assert!(dir.path().join("bflat_major_lh.png").exists());
    assert!(dir.path().join("gsharp_harmonic_minor_rh.png").exists());
    assert!(dir.path().join("fsharp_major_rh.png").exists());
}

/// Generating twice gives byte-identical output
#[test]
fn test_generation_is_deterministic() {
    let first = tempdir().unwrap();
    let second = tempdir().unwrap();
    let config = RenderConfig::default();
    let fingerings = FingeringTable::builtin().unwrap();

    let a = Generator::new(first.path(), &config, &fingerings, &BlockTypeface)
        .generate_scale("Eb", ScaleType::Major)
        .unwrap();
    let b = Generator::new(second.path(), &config, &fingerings, &BlockTypeface)
        .generate_scale("Eb", ScaleType::Major)
        .unwrap();

    for (x, y) in a.iter().zip(&b) {
        assert_eq!(fs::read(x).unwrap(), fs::read(y).unwrap());
    }
}

/// Unknown roots fail before anything is written
#[test]
fn test_unknown_root_fails() {
    let dir = tempdir().unwrap();
    let config = RenderConfig::default();
    let fingerings = FingeringTable::builtin().unwrap();

    let generator = Generator::new(dir.path(), &config, &fingerings, &BlockTypeface);
    assert!(generator.generate_scale("H", ScaleType::Major).is_err());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

/// Roots without a fingering are reported, not rendered with a guess
#[test]
fn test_missing_fingering_fails() {
    let dir = tempdir().unwrap();
    let config = RenderConfig::default();
    let fingerings = FingeringTable::builtin().unwrap();

    let generator = Generator::new(dir.path(), &config, &fingerings, &BlockTypeface);
    let err = generator.generate_scale("C", ScaleType::NaturalMinor).unwrap_err();
    assert!(err.to_string().contains("No RH fingering for C Natural Minor"));
}

/// Output paths that cannot be created abort the run
#[test]
fn test_unwritable_output_fails() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("not_a_dir");
    fs::write(&blocker, b"file").unwrap();

    let config = RenderConfig::default();
    let fingerings = FingeringTable::builtin().unwrap();
    let generator = Generator::new(blocker.join("output"), &config, &fingerings, &BlockTypeface);
    assert!(generator.generate_scale("C", ScaleType::Major).is_err());
}

/// A missing font stops the run with a download hint
#[test]
fn test_missing_font_is_fatal() {
    let dir = tempdir().unwrap();
    let config = RenderConfig::default();

    let result = GlyphTypeface::load(dir.path().join(&config.font_path), config.font_size);
    match result {
        Err(err @ FontError::Missing { .. }) => {
            assert!(err.to_string().contains("libertinusmath"));
        }
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("font should not exist in a fresh temp dir"),
    }
}

/// Wider keyboards grow the image and still highlight two octaves
#[test]
fn test_custom_octave_span() {
    let config = RenderConfig::from_yaml("octaves: 4\n").unwrap();
    let fingerings = FingeringTable::builtin().unwrap();
    let renderer = Renderer::new(&config, &BlockTypeface);
    let scale = build_scale("A", &ScaleType::HarmonicMinor.interval_set(), config.octaves).unwrap();

    let image = renderer
        .render(
            &scale,
            9,
            fingerings.get(ScaleType::HarmonicMinor, Hand::Right, "A").unwrap(),
            "A harmonic minor for RH",
        )
        .unwrap();
    assert_eq!(image.dimensions(), (28 * 40, 240));
}
