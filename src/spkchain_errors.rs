use std::fmt;

use thiserror::Error;

use crate::kernel::registry::Handle;

/// Bounded container that overflowed during a chain walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapacityKind {
    /// The ordered list of located segments.
    SegmentList,
    /// The list of body IDs visited by one walk.
    BodyChain,
}

impl fmt::Display for CapacityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CapacityKind::SegmentList => "segment list",
            CapacityKind::BodyChain => "body chain",
        };
        write!(f, "{s}")
    }
}

#[derive(Error, Debug)]
pub enum SpkChainError {
    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Error during the nom parsing: {0}")]
    NomParsingError(String),

    #[error("Not a DAF/SPK kernel: {0}")]
    InvalidKernel(String),

    #[error("Unsupported binary format {0} (only LTL-IEEE kernels can be read)")]
    UnsupportedBinaryFormat(String),

    #[error("Invalid summary format: ND = {nd}, NI = {ni} (expected ND = 2, NI = 6)")]
    InvalidSummaryFormat { nd: i32, ni: i32 },

    #[error("Corrupt summary record: {0}")]
    CorruptSummaryRecord(String),

    #[error("Corrupt descriptor for body {target}: start {start} is after end {end}")]
    CorruptDescriptor { target: i32, start: f64, end: f64 },

    #[error("Unknown kernel handle: {0}")]
    UnknownHandle(Handle),

    #[error("The {kind} exceeds its capacity of {limit} entries; a capacity of at least {needed} is required")]
    CapacityExceeded {
        kind: CapacityKind,
        limit: usize,
        needed: usize,
    },

    #[error("Invalid resolver configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid SPK data type: {0}")]
    InvalidSpkDataType(i32),

    #[error("Segment locator failure: {0}")]
    LocatorFailure(String),

    #[error("No kernel handle left: {0} kernels were loaded over the registry lifetime")]
    HandlesExhausted(i32),
}

impl<E: fmt::Debug> From<nom::Err<E>> for SpkChainError {
    fn from(err: nom::Err<E>) -> Self {
        SpkChainError::NomParsingError(format!("{err:?}"))
    }
}

impl PartialEq for SpkChainError {
    fn eq(&self, other: &Self) -> bool {
        use SpkChainError::*;
        match (self, other) {
            // io::Error is not comparable: same variant is enough
            (IoError(_), IoError(_)) => true,

            (NomParsingError(a), NomParsingError(b)) => a == b,
            (InvalidKernel(a), InvalidKernel(b)) => a == b,
            (UnsupportedBinaryFormat(a), UnsupportedBinaryFormat(b)) => a == b,
            (
                InvalidSummaryFormat { nd: a, ni: b },
                InvalidSummaryFormat { nd: c, ni: d },
            ) => a == c && b == d,
            (CorruptSummaryRecord(a), CorruptSummaryRecord(b)) => a == b,
            (
                CorruptDescriptor {
                    target: t1,
                    start: s1,
                    end: e1,
                },
                CorruptDescriptor {
                    target: t2,
                    start: s2,
                    end: e2,
                },
            ) => t1 == t2 && s1 == s2 && e1 == e2,
            (UnknownHandle(a), UnknownHandle(b)) => a == b,
            (
                CapacityExceeded {
                    kind: k1,
                    limit: l1,
                    needed: n1,
                },
                CapacityExceeded {
                    kind: k2,
                    limit: l2,
                    needed: n2,
                },
            ) => k1 == k2 && l1 == l2 && n1 == n2,
            (InvalidConfig(a), InvalidConfig(b)) => a == b,
            (InvalidSpkDataType(a), InvalidSpkDataType(b)) => a == b,
            (LocatorFailure(a), LocatorFailure(b)) => a == b,

            (HandlesExhausted(a), HandlesExhausted(b)) => a == b,

            _ => false,
        }
    }
}
