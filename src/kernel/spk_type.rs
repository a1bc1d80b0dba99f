//! SPK data type codes.
//!
//! The resolver never evaluates segment data, so a type is only a validated
//! code with a short label for reports.

use std::fmt;

use crate::spkchain_errors::SpkChainError;

const FIRST_TYPE: i32 = 1;
const LAST_TYPE: i32 = 21;

/// Labels of the assigned codes; codes of the range missing here are reserved.
const LABELS: [(i32, &str); 16] = [
    (1, "modified difference arrays"),
    (2, "Chebyshev position"),
    (3, "Chebyshev position and velocity"),
    (5, "discrete states"),
    (8, "Lagrange, equal steps"),
    (9, "Lagrange, unequal steps"),
    (10, "two-line elements"),
    (12, "Hermite, equal steps"),
    (13, "Hermite, unequal steps"),
    (14, "Chebyshev, unequal steps"),
    (15, "precessing conic"),
    (17, "equinoctial elements"),
    (18, "ESOC Hermite/Lagrange"),
    (19, "ESOC piecewise"),
    (20, "Chebyshev velocity"),
    (21, "extended difference arrays"),
];

/// Data type code of a segment, known to lie in `1..=21`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpkDataType(i32);

impl SpkDataType {
    pub fn code(&self) -> i32 {
        self.0
    }

    /// Short description, `None` for reserved codes.
    pub fn label(&self) -> Option<&'static str> {
        LABELS
            .iter()
            .find(|(code, _)| *code == self.0)
            .map(|(_, label)| *label)
    }
}

impl TryFrom<i32> for SpkDataType {
    type Error = SpkChainError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        if (FIRST_TYPE..=LAST_TYPE).contains(&code) {
            Ok(SpkDataType(code))
        } else {
            Err(SpkChainError::InvalidSpkDataType(code))
        }
    }
}

impl fmt::Display for SpkDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type {}, {}", self.0, self.label().unwrap_or("reserved"))
    }
}
