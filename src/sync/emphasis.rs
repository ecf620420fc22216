use std::fmt;

use serde::Serialize;

use crate::sync::cursor::to_signed;

// @module: Distance-based line emphasis

/// Visual emphasis bucket for a line, by ordinal distance from the active line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Emphasis {
    // @distance: 0
    Active,
    // @distance: 1
    Near,
    // @distance: 2
    Far,
    // @distance: more than 2
    Distant,
}

impl Emphasis {
    // @returns: Bucket for an index distance
    pub fn from_distance(distance: u64) -> Self {
        match distance {
            0 => Self::Active,
            1 => Self::Near,
            2 => Self::Far,
            _ => Self::Distant,
        }
    }

    // @returns: Presentation class name
    pub fn class_name(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Near => "near",
            Self::Far => "far",
            Self::Distant => "distant",
        }
    }
}

impl fmt::Display for Emphasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.class_name())
    }
}

/// Emphasis of line `index` given the active line.
///
/// "No active line" counts as index `-1`, so before the first timestamp the
/// opening line is already `Near`.
pub fn emphasis_for(index: usize, active: Option<usize>) -> Emphasis {
    let distance = (index as i64 - to_signed(active)).unsigned_abs();
    Emphasis::from_distance(distance)
}

/// Emphasis for every line of a document of `len` lines
pub fn emphasis_window(len: usize, active: Option<usize>) -> Vec<Emphasis> {
    (0..len).map(|i| emphasis_for(i, active)).collect()
}
