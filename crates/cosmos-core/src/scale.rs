//! Narrative scales of the meditation.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// One of the four narrative/visual stages, ordered by increasing zoom.
///
/// The ordering of the variants is the ordering of a run: a run only ever
/// moves forward through it.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Scale {
    #[default]
    Earth,
    Solar,
    Galaxy,
    Universe,
}

impl Scale {
    /// All scales in run order.
    pub const ALL: [Scale; 4] = [Scale::Earth, Scale::Solar, Scale::Galaxy, Scale::Universe];

    /// Returns the scale that follows this one, or `None` after Universe.
    pub fn next(self) -> Option<Scale> {
        match self {
            Scale::Earth => Some(Scale::Solar),
            Scale::Solar => Some(Scale::Galaxy),
            Scale::Galaxy => Some(Scale::Universe),
            Scale::Universe => None,
        }
    }

    /// Zero-based position in run order.
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Human readable name of the viewpoint.
    pub fn label(self) -> &'static str {
        match self {
            Scale::Earth => "Earth view",
            Scale::Solar => "Solar System view",
            Scale::Galaxy => "Milky Way view",
            Scale::Universe => "Universe view",
        }
    }
}
