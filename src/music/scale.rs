// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Scale model for keyboard diagrams.
//!
//! Resolves root spellings to pitch classes, defines the supported scale
//! types, and maps absolute chromatic positions on a multi-octave keyboard
//! to (scale degree, scale octave) pairs anchored on the first tonic.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of notes in every supported scale
pub const SCALE_LENGTH: usize = 7;

/// Semitones per chromatic octave
pub const OCTAVE: u32 = 12;

/// Errors raised while building a scale
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScaleError {
    #[error("Unrecognized root spelling: {0:?}")]
    UnknownRoot(String),
    #[error("Invalid interval set {intervals:?}: {reason}")]
    InvalidIntervals { intervals: Vec<u8>, reason: String },
}

/// Note names (pitch classes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Note {
    C,
    Cs, // C# / Db
    D,
    Ds, // D# / Eb
    E,
    F,
    Fs, // F# / Gb
    G,
    Gs, // G# / Ab
    A,
    As, // A# / Bb
    B,
}

impl Note {
    /// All notes in chromatic order
    pub const ALL: [Note; 12] = [
        Note::C,
        Note::Cs,
        Note::D,
        Note::Ds,
        Note::E,
        Note::F,
        Note::Fs,
        Note::G,
        Note::Gs,
        Note::A,
        Note::As,
        Note::B,
    ];

    /// Get the pitch class (0-11) for this note
    pub fn pitch_class(self) -> u8 {
        self as u8
    }

    /// Get note from pitch class
    pub fn from_pitch_class(pc: u8) -> Self {
        Note::ALL[(pc % 12) as usize]
    }

    /// Resolve a spelling such as "C", "F#", "Bb" or "Cb".
    ///
    /// Spellings are case-sensitive: "Bb" is B flat, "bb" is rejected.
    pub fn parse(spelling: &str) -> Result<Self, ScaleError> {
        let note = match spelling.trim() {
            "C" | "B#" => Note::C,
            "C#" | "Db" => Note::Cs,
            "D" => Note::D,
            "D#" | "Eb" => Note::Ds,
            "E" | "Fb" => Note::E,
            "F" | "E#" => Note::F,
            "F#" | "Gb" => Note::Fs,
            "G" => Note::G,
            "G#" | "Ab" => Note::Gs,
            "A" => Note::A,
            "A#" | "Bb" => Note::As,
            "B" | "Cb" => Note::B,
            _ => return Err(ScaleError::UnknownRoot(spelling.to_string())),
        };
        Ok(note)
    }
}

/// Scale types supported by the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleType {
    Major,
    NaturalMinor,
    HarmonicMinor,
}

impl ScaleType {
    /// Get the intervals (semitones from root) for this scale type
    pub fn intervals(self) -> [u8; SCALE_LENGTH] {
        match self {
            ScaleType::Major => [0, 2, 4, 5, 7, 9, 11],
            ScaleType::NaturalMinor => [0, 2, 3, 5, 7, 8, 10],
            ScaleType::HarmonicMinor => [0, 2, 3, 5, 7, 8, 11],
        }
    }

    /// The validated interval set for this scale type
    pub fn interval_set(self) -> IntervalSet {
        IntervalSet(self.intervals())
    }

    /// Parse scale type from string
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase().replace([' ', '-', '_'], "");
        match s.as_str() {
            "major" | "ionian" => Some(ScaleType::Major),
            "minor" | "naturalminor" | "aeolian" => Some(ScaleType::NaturalMinor),
            "harmonicminor" => Some(ScaleType::HarmonicMinor),
            _ => None,
        }
    }

    /// Get a human-readable name for this scale type
    pub fn name(self) -> &'static str {
        match self {
            ScaleType::Major => "Major",
            ScaleType::NaturalMinor => "Natural Minor",
            ScaleType::HarmonicMinor => "Harmonic Minor",
        }
    }

    /// Lowercase form used in captions
    pub fn caption(self) -> &'static str {
        match self {
            ScaleType::Major => "major",
            ScaleType::NaturalMinor => "natural minor",
            ScaleType::HarmonicMinor => "harmonic minor",
        }
    }

    /// Form used in output file names
    pub fn slug(self) -> &'static str {
        match self {
            ScaleType::Major => "major",
            ScaleType::NaturalMinor => "natural_minor",
            ScaleType::HarmonicMinor => "harmonic_minor",
        }
    }
}

impl fmt::Display for ScaleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Seven strictly increasing semitone offsets in [0, 11]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalSet([u8; SCALE_LENGTH]);

impl IntervalSet {
    /// Validate and wrap a list of intervals
    pub fn new(intervals: Vec<u8>) -> Result<Self, ScaleError> {
        let invalid = |reason: &str| ScaleError::InvalidIntervals {
            intervals: intervals.clone(),
            reason: reason.to_string(),
        };

        if intervals.len() != SCALE_LENGTH {
            return Err(invalid("expected exactly 7 intervals"));
        }
        if intervals.iter().any(|&i| i >= OCTAVE as u8) {
            return Err(invalid("intervals must lie within one octave"));
        }
        if intervals.windows(2).any(|w| w[0] >= w[1]) {
            return Err(invalid("intervals must be strictly increasing"));
        }

        let mut set = [0u8; SCALE_LENGTH];
        set.copy_from_slice(&intervals);
        Ok(Self(set))
    }

    /// Get the raw offsets
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

/// Which repetition of the scale a note belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScaleOctave {
    /// Leading notes below the first tonic; never highlighted
    PreRoot,
    /// Octave counted from the first tonic
    InScale(u32),
}

/// Degree and scale octave of one keyboard position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScalePosition {
    /// 0-based scale degree, 0 = tonic
    pub degree: u8,
    pub octave: ScaleOctave,
}

impl ScalePosition {
    /// Whether this note is drawn with fingering.
    ///
    /// Covers the first two scale octaves plus the closing tonic that
    /// ends the two-octave run.
    pub fn is_highlighted(&self) -> bool {
        match self.octave {
            ScaleOctave::InScale(0) | ScaleOctave::InScale(1) => true,
            ScaleOctave::InScale(2) => self.degree == 0,
            _ => false,
        }
    }
}

/// Chromatic positions of a scale across the keyboard
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScaleMap {
    positions: BTreeMap<u32, ScalePosition>,
}

impl ScaleMap {
    /// Look up a chromatic position
    pub fn get(&self, position: u32) -> Option<ScalePosition> {
        self.positions.get(&position).copied()
    }

    /// Check if a chromatic position is in the scale
    pub fn contains(&self, position: u32) -> bool {
        self.positions.contains_key(&position)
    }

    /// Entries in ascending position order
    pub fn iter(&self) -> impl Iterator<Item = (u32, ScalePosition)> + '_ {
        self.positions.iter().map(|(&p, &s)| (p, s))
    }

    /// Number of positions in the map
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Check if the map is empty
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Check if a position is in the scale and highlighted
    pub fn is_highlighted(&self, position: u32) -> bool {
        self.get(position).is_some_and(|s| s.is_highlighted())
    }

    /// Positions of every tonic, ascending
    pub fn tonics(&self) -> Vec<u32> {
        self.iter()
            .filter(|(_, s)| s.degree == 0)
            .map(|(p, _)| p)
            .collect()
    }
}

/// Map every scale note on an `octave_span`-octave keyboard to its degree
/// and scale octave.
///
/// Positions are sorted left to right before numbering, since offsets
/// from a non-C root wrap past the octave boundary.
pub fn build_scale(
    root: &str,
    intervals: &IntervalSet,
    octave_span: u32,
) -> Result<ScaleMap, ScaleError> {
    let root_index = Note::parse(root)?.pitch_class() as u32;

    let mut candidates: Vec<(u32, u8)> = (0..octave_span)
        .flat_map(|octave| {
            intervals.as_slice().iter().enumerate().map(move |(degree, &offset)| {
                let position = (root_index + offset as u32) % OCTAVE + octave * OCTAVE;
                (position, degree as u8)
            })
        })
        .collect();
    candidates.sort_by_key(|&(position, _)| position);

    let anchor = candidates.iter().position(|&(_, degree)| degree == 0);

    let positions = candidates
        .iter()
        .enumerate()
        .map(|(i, &(position, degree))| {
            let octave = match anchor {
                Some(a) if i >= a => ScaleOctave::InScale(((i - a) / SCALE_LENGTH) as u32),
                _ => ScaleOctave::PreRoot,
            };
            (position, ScalePosition { degree, octave })
        })
        .collect();

    Ok(ScaleMap { positions })
}
