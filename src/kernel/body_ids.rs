//! Display names of well-known NAIF body IDs.
//!
//! Any `i32` is a valid body ID for the resolver; this table only makes
//! reports readable. Unknown IDs are rendered as their number.

use std::fmt;

use crate::constants::SSB;

const KNOWN_BODIES: &[(i32, &str)] = &[
    (SSB, "Solar System Barycenter"),
    (1, "Mercury Barycenter"),
    (2, "Venus Barycenter"),
    (3, "Earth-Moon Barycenter"),
    (4, "Mars Barycenter"),
    (5, "Jupiter Barycenter"),
    (6, "Saturn Barycenter"),
    (7, "Uranus Barycenter"),
    (8, "Neptune Barycenter"),
    (9, "Pluto Barycenter"),
    (10, "Sun"),
    (199, "Mercury"),
    (299, "Venus"),
    (301, "Moon"),
    (399, "Earth"),
    (401, "Phobos"),
    (402, "Deimos"),
    (499, "Mars"),
    (501, "Io"),
    (502, "Europa"),
    (503, "Ganymede"),
    (504, "Callisto"),
    (599, "Jupiter"),
    (606, "Titan"),
    (699, "Saturn"),
    (799, "Uranus"),
    (899, "Neptune"),
    (901, "Charon"),
    (999, "Pluto"),
];

/// Name of a well-known body, `None` for any other ID.
pub fn body_name(id: i32) -> Option<&'static str> {
    KNOWN_BODIES
        .iter()
        .find(|(known, _)| *known == id)
        .map(|(_, name)| *name)
}

/// Body ID wrapper used for display: `"Earth (399)"` or `"1000012"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyLabel(pub i32);

impl fmt::Display for BodyLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match body_name(self.0) {
            Some(name) => write!(f, "{name} ({})", self.0),
            None => write!(f, "{}", self.0),
        }
    }
}
