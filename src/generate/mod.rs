// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Batch generation of scale diagrams.
//!
//! Walks the published major and harmonic minor roots, renders a
//! right-hand and left-hand diagram for each, and writes them as PNG
//! files into an output directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::{FingeringTable, Hand, RenderConfig};
use crate::music::{build_scale, Note, ScaleType};
use crate::render::{Renderer, Typeface};

/// Major keys, in circle-of-fifths order
pub const MAJOR_ROOTS: [&str; 12] = ["C", "G", "D", "A", "E", "B", "F#", "C#", "F", "Bb", "Eb", "Ab"];

/// Harmonic minor keys, in circle-of-fifths order
pub const HARMONIC_MINOR_ROOTS: [&str; 12] =
    ["A", "E", "B", "F#", "C#", "G#", "D#", "A#", "D", "G", "C", "F"];

/// Make a root spelling safe for a file name ("F#" -> "fsharp")
pub fn sanitize_filename(name: &str) -> String {
    name.replace('#', "sharp")
        .replace('b', "flat")
        .replace(' ', "_")
        .to_lowercase()
}

/// Spell a root with musical sharp and flat signs ("Bb" -> "B♭")
pub fn unicode_root(root: &str) -> String {
    root.replace('#', "♯").replace('b', "♭")
}

/// Caption form of a root, listing the enharmonic twin where a key is
/// commonly written both ways
pub fn display_root(scale: ScaleType, root: &str) -> String {
    let pairs: &[(&str, &str)] = match scale {
        ScaleType::Major => &[("F#", "Gb"), ("C#", "Db"), ("B", "Cb")],
        ScaleType::NaturalMinor | ScaleType::HarmonicMinor => {
            &[("G#", "Ab"), ("D#", "Eb"), ("A#", "Bb")]
        }
    };

    pairs
        .iter()
        .find(|(sharp, flat)| root == *sharp || root == *flat)
        .map(|(sharp, flat)| format!("{}/{}", unicode_root(sharp), unicode_root(flat)))
        .unwrap_or_else(|| unicode_root(root))
}

/// Caption drawn above a keyboard ("F♯/G♭ major for RH")
pub fn caption(scale: ScaleType, hand: Hand, root: &str) -> String {
    format!("{} {} for {}", display_root(scale, root), scale.caption(), hand.label())
}

/// Output file name ("fsharp_harmonic_minor_lh.png")
pub fn output_filename(scale: ScaleType, hand: Hand, root: &str) -> String {
    format!("{}_{}_{}.png", sanitize_filename(root), scale.slug(), hand.slug())
}

/// Totals from a batch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    /// Scales rendered
    pub scales: usize,
    /// Every file written, in order
    pub files: Vec<PathBuf>,
}

/// Renders scale diagrams into an output directory
pub struct Generator<'a> {
    output_dir: PathBuf,
    fingerings: &'a FingeringTable,
    renderer: Renderer<'a>,
}

impl<'a> Generator<'a> {
    pub fn new<P: AsRef<Path>>(
        output_dir: P,
        config: &'a RenderConfig,
        fingerings: &'a FingeringTable,
        typeface: &'a dyn Typeface,
    ) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            fingerings,
            renderer: Renderer::new(config, typeface),
        }
    }

    /// Get the output directory
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Render both hands for one scale and write them to disk.
    ///
    /// Returns the written paths, right hand first.
    pub fn generate_scale(&self, root: &str, scale: ScaleType) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.output_dir).with_context(|| {
            format!("Failed to create output directory: {:?}", self.output_dir)
        })?;

        let tonic = Note::parse(root)?.pitch_class();
        let octaves = self.renderer.config().octaves;
        let scale_map = build_scale(root, &scale.interval_set(), octaves)?;
        info!(root, scale = scale.name(), "Rendering scale");

        let mut written = Vec::with_capacity(Hand::BOTH.len());
        for hand in Hand::BOTH {
            let fingering = self.fingerings.get(scale, hand, root)?;
            let label = caption(scale, hand, root);
            let image = self
                .renderer
                .render(&scale_map, tonic, fingering, &label)
                .with_context(|| format!("Failed to render {} {} for {}", root, scale, hand))?;

            let path = self.output_dir.join(output_filename(scale, hand, root));
            image
                .save(&path)
                .with_context(|| format!("Failed to write image: {:?}", path))?;
            debug!(path = %path.display(), "Wrote image");
            written.push(path);
        }

        Ok(written)
    }

    /// Render every scale in `roots`, printing a progress line per scale
    pub fn generate_roots(&self, roots: &[&str], scale: ScaleType) -> Result<Summary> {
        let mut summary = Summary::default();

        for root in roots {
            let files = self.generate_scale(root, scale)?;
            let names: Vec<String> = files
                .iter()
                .filter_map(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .collect();
            println!("  ✓ {} {} -> {}", root, scale, names.join(", "));

            summary.scales += 1;
            summary.files.extend(files);
        }

        Ok(summary)
    }

    /// Render all published major and harmonic minor scales
    pub fn generate_all(&self) -> Result<Summary> {
        println!("Generating piano scale images in '{}/'...", self.output_dir.display());
        println!("Keyboard: {} octaves", self.renderer.config().octaves);
        println!();

        println!("Generating major scales...");
        let mut summary = self.generate_roots(&MAJOR_ROOTS, ScaleType::Major)?;

        println!();
        println!("Generating harmonic minor scales...");
        let minors = self.generate_roots(&HARMONIC_MINOR_ROOTS, ScaleType::HarmonicMinor)?;

        summary.scales += minors.scales;
        summary.files.extend(minors.files);
        info!(scales = summary.scales, files = summary.files.len(), "Batch complete");
        Ok(summary)
    }
}
