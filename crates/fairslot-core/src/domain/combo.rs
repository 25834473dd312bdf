//! Positions in the combination space.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize, Serializer};

use crate::error::FairslotError;

/// Mixed-radix index of a combination (one option per round).
pub type ComboIndex = u64;

/// A combination addressed either by its index or by per-round option indices.
///
/// Parses `"121,604,611"` (or `"121604611"`) as an index and `"12-45-3"` as
/// an index vector.
///
/// # Example
///
/// ```
/// use fairslot_core::ComboPosition;
///
/// let pos: ComboPosition = "1,204".parse().unwrap();
/// assert_eq!(pos, ComboPosition::Index(1204));
///
/// let pos: ComboPosition = "12-45-3".parse().unwrap();
/// assert_eq!(pos, ComboPosition::Indices(vec![12, 45, 3]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawPosition"))]
pub enum ComboPosition {
    Index(ComboIndex),
    Indices(Vec<usize>),
}

impl FromStr for ComboPosition {
    type Err = FairslotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || FairslotError::Config(format!("invalid combo position '{s}'"));

        if s.contains('-') {
            let indices = s
                .split('-')
                .map(|part| part.trim().parse::<usize>().map_err(|_| invalid()))
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(ComboPosition::Indices(indices));
        }

        let digits: String = s.chars().filter(|c| *c != ',' && *c != '_').collect();
        digits
            .parse::<ComboIndex>()
            .map(ComboPosition::Index)
            .map_err(|_| invalid())
    }
}

impl fmt::Display for ComboPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComboPosition::Index(index) => write!(f, "{index}"),
            ComboPosition::Indices(indices) => {
                for (i, index) in indices.iter().enumerate() {
                    if i > 0 {
                        f.write_str("-")?;
                    }
                    write!(f, "{index}")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(feature = "serde")]
impl Serialize for ComboPosition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ComboPosition::Index(index) => serializer.serialize_u64(*index),
            ComboPosition::Indices(indices) => serializer.collect_seq(indices),
        }
    }
}

// Accepted serde shapes: 1204, [12, 45, 3], "1,204" or "12-45-3".
#[cfg(feature = "serde")]
#[derive(Deserialize)]
#[serde(untagged)]
enum RawPosition {
    Index(ComboIndex),
    Indices(Vec<usize>),
    Text(String),
}

#[cfg(feature = "serde")]
impl TryFrom<RawPosition> for ComboPosition {
    type Error = FairslotError;

    fn try_from(raw: RawPosition) -> Result<Self, Self::Error> {
        match raw {
            RawPosition::Index(index) => Ok(ComboPosition::Index(index)),
            RawPosition::Indices(indices) => Ok(ComboPosition::Indices(indices)),
            RawPosition::Text(text) => text.parse(),
        }
    }
}
