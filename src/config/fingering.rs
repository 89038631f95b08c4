// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Scale fingering tables.
//!
//! Fingerings are declared in YAML (see `data/fingerings.yaml`) as full
//! sequences plus aliases for roots that share a sequence. The table is
//! resolved once into an immutable lookup keyed by scale type, hand and
//! root spelling.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::music::ScaleType;

/// Fingerings bundled with the binary
pub const BUILTIN_FINGERINGS: &str = include_str!("../../data/fingerings.yaml");

/// Two octaves of seven notes plus the closing tonic
pub const MIN_FINGERING_LENGTH: usize = 15;

/// Errors raised while building or querying a fingering table
#[derive(Debug, Error)]
pub enum FingeringError {
    #[error("Failed to parse fingering table: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("No {hand} fingering for {root} {scale}")]
    MissingRoot {
        scale: ScaleType,
        hand: Hand,
        root: String,
    },
    #[error("{hand} fingering for {root} {scale} has {len} fingers, expected at least {min}")]
    TooShort {
        scale: ScaleType,
        hand: Hand,
        root: String,
        len: usize,
        min: usize,
    },
    #[error("{hand} fingering for {root} {scale} uses finger {finger}, expected 1-5")]
    InvalidFinger {
        scale: ScaleType,
        hand: Hand,
        root: String,
        finger: u8,
    },
    #[error("{hand} {scale} alias {root} points at undefined root {target}")]
    DanglingAlias {
        scale: ScaleType,
        hand: Hand,
        root: String,
        target: String,
    },
}

/// Which hand a fingering is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hand {
    #[serde(rename = "rh")]
    Right,
    #[serde(rename = "lh")]
    Left,
}

impl Hand {
    /// Both hands, right first
    pub const BOTH: [Hand; 2] = [Hand::Right, Hand::Left];

    /// Short label used in captions ("RH" / "LH")
    pub fn label(self) -> &'static str {
        match self {
            Hand::Right => "RH",
            Hand::Left => "LH",
        }
    }

    /// Form used in output file names
    pub fn slug(self) -> &'static str {
        match self {
            Hand::Right => "rh",
            Hand::Left => "lh",
        }
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One (scale, hand) section of the fingering file
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FingeringSection {
    /// Full finger sequences keyed by root spelling
    #[serde(default)]
    pub fingerings: HashMap<String, Vec<u8>>,
    /// Roots that reuse another root's sequence
    #[serde(default)]
    pub aliases: HashMap<String, String>,
}

/// Raw layout of the fingering file
pub type FingeringFile = HashMap<ScaleType, HashMap<Hand, FingeringSection>>;

/// Resolved, read-only fingering lookup
#[derive(Debug, Clone, Default)]
pub struct FingeringTable {
    entries: HashMap<(ScaleType, Hand, String), Vec<u8>>,
}

impl FingeringTable {
    /// Build the table shipped with the binary
    pub fn builtin() -> Result<Self, FingeringError> {
        Self::from_yaml(BUILTIN_FINGERINGS)
    }

    /// Parse and resolve a fingering table from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, FingeringError> {
        let file: FingeringFile = serde_yaml::from_str(yaml)?;
        Self::from_file(file)
    }

    /// Resolve aliases and validate every sequence
    pub fn from_file(file: FingeringFile) -> Result<Self, FingeringError> {
        let mut entries = HashMap::new();

        for (scale, hands) in file {
            for (hand, section) in hands {
                for (root, fingers) in &section.fingerings {
                    validate(scale, hand, root, fingers)?;
                    entries.insert((scale, hand, root.trim().to_string()), fingers.clone());
                }

                for (root, target) in &section.aliases {
                    let fingers = section.fingerings.get(target).ok_or_else(|| {
                        FingeringError::DanglingAlias {
                            scale,
                            hand,
                            root: root.clone(),
                            target: target.clone(),
                        }
                    })?;
                    entries.insert((scale, hand, root.trim().to_string()), fingers.clone());
                }
            }
        }

        Ok(Self { entries })
    }

    /// Look up the finger sequence for a root spelling
    pub fn get(&self, scale: ScaleType, hand: Hand, root: &str) -> Result<&[u8], FingeringError> {
        self.entries
            .get(&(scale, hand, root.trim().to_string()))
            .map(Vec::as_slice)
            .ok_or_else(|| FingeringError::MissingRoot {
                scale,
                hand,
                root: root.to_string(),
            })
    }

    /// Root spellings with a fingering for this scale and hand, sorted
    pub fn roots(&self, scale: ScaleType, hand: Hand) -> Vec<&str> {
        let mut roots: Vec<&str> = self
            .entries
            .keys()
            .filter(|(s, h, _)| *s == scale && *h == hand)
            .map(|(_, _, root)| root.as_str())
            .collect();
        roots.sort();
        roots
    }

    /// Number of resolved (scale, hand, root) entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn validate(scale: ScaleType, hand: Hand, root: &str, fingers: &[u8]) -> Result<(), FingeringError> {
    if fingers.len() < MIN_FINGERING_LENGTH {
        return Err(FingeringError::TooShort {
            scale,
            hand,
            root: root.to_string(),
            len: fingers.len(),
            min: MIN_FINGERING_LENGTH,
        });
    }
    if let Some(&finger) = fingers.iter().find(|f| !(1..=5).contains(*f)) {
        return Err(FingeringError::InvalidFinger {
            scale,
            hand,
            root: root.to_string(),
            finger,
        });
    }
    Ok(())
}
