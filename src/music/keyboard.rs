// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Physical key layout of a chromatic keyboard.

use super::scale::OCTAVE;

/// Whether a key is a white (natural) or black (accidental) key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    Natural,
    Accidental,
}

/// Key kind for each pitch class, starting at C
pub const KEY_PATTERN: [KeyKind; 12] = [
    KeyKind::Natural,
    KeyKind::Accidental,
    KeyKind::Natural,
    KeyKind::Accidental,
    KeyKind::Natural,
    KeyKind::Natural,
    KeyKind::Accidental,
    KeyKind::Natural,
    KeyKind::Accidental,
    KeyKind::Natural,
    KeyKind::Accidental,
    KeyKind::Natural,
];

/// Key kind at an absolute chromatic position
pub fn key_kind(position: u32) -> KeyKind {
    KEY_PATTERN[(position % OCTAVE) as usize]
}

/// Total keys on a keyboard spanning `octaves` octaves
pub fn key_count(octaves: u32) -> u32 {
    octaves * OCTAVE
}

/// Number of natural keys on a keyboard spanning `octaves` octaves
pub fn natural_count(octaves: u32) -> u32 {
    (0..key_count(octaves))
        .filter(|&p| key_kind(p) == KeyKind::Natural)
        .count() as u32
}
