//! Segment lookup contract used by the chain walk.

use crate::{
    kernel::{descriptor::SegmentDescriptor, registry::Handle},
    spkchain_errors::SpkChainError,
};

/// A segment found for a body at an epoch, with the kernel it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocatedSegment {
    pub handle: Handle,
    pub descriptor: SegmentDescriptor,
}

/// Finds the highest-priority segment covering a body at an epoch.
///
/// The three outcomes are distinct:
/// * `Ok(Some(segment))`: found; `segment.descriptor.target == body` and the
///   descriptor covers `epoch`.
/// * `Ok(None)`: no loaded segment covers the body at that epoch.
/// * `Err(_)`: the lookup itself failed; the caller must stop.
pub trait SegmentLocator {
    fn locate(&self, body: i32, epoch: f64) -> Result<Option<LocatedSegment>, SpkChainError>;
}

impl<T: SegmentLocator + ?Sized> SegmentLocator for &T {
    fn locate(&self, body: i32, epoch: f64) -> Result<Option<LocatedSegment>, SpkChainError> {
        (**self).locate(body, epoch)
    }
}
