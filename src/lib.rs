// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Piano scale diagrams.
//!
//! Builds the chromatic layout of major and minor scales across a
//! multi-octave keyboard and renders fingering diagrams for each hand.

pub mod config;
pub mod generate;
pub mod music;
pub mod render;

pub use config::{FingeringTable, Hand, RenderConfig};
pub use generate::Generator;
pub use music::{build_scale, Note, ScaleMap, ScaleOctave, ScaleType};
pub use render::{GlyphTypeface, Renderer, Typeface};
