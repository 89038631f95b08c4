// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Music theory utilities for keyboard diagrams.
//!
//! This module provides note spellings, scale definitions, and the
//! chromatic key layout used to place scale notes on a keyboard.

pub mod keyboard;
pub mod scale;

pub use keyboard::{key_kind, KeyKind};
pub use scale::{
    build_scale, IntervalSet, Note, ScaleError, ScaleMap, ScaleOctave, ScalePosition, ScaleType,
};
