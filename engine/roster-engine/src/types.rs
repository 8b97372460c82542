use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;

/// Target gameweek of a selection (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gameweek(NonZeroU32);

impl Gameweek {
    /// Returns `None` for gameweek zero
    pub fn new(number: u32) -> Option<Self> {
        NonZeroU32::new(number).map(Self)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for Gameweek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GW{}", self.0)
    }
}

/// One-time lineup modifier. `None` in an `Option<Chip>` means no chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Chip {
    #[serde(rename = "BB")]
    BenchBoost,
    #[serde(rename = "TC")]
    TripleCaptain,
    #[serde(rename = "WC")]
    Wildcard,
}

impl Chip {
    pub fn code(self) -> &'static str {
        match self {
            Chip::BenchBoost => "BB",
            Chip::TripleCaptain => "TC",
            Chip::Wildcard => "WC",
        }
    }
}

impl fmt::Display for Chip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Chip::BenchBoost => "Bench Boost",
            Chip::TripleCaptain => "Triple Captain",
            Chip::Wildcard => "Wildcard",
        };
        f.write_str(name)
    }
}

/// Where a selection stands relative to submission
///
/// `Validated` is never stored; it is derived from the live state each time
/// the status is asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionStatus {
    /// Local changes exist that either fail validation or were never submitted
    Editing,
    /// Current state passes every submission check
    Validated,
    /// The fantasy service accepted this exact state
    Submitted,
}
