use std::fmt;

use hifitime::Epoch;

use crate::kernel::{body_ids::BodyLabel, descriptor::SegmentDescriptor, registry::Handle};

use super::locator::LocatedSegment;

/// Result of one chain resolution.
///
/// Segments are ordered target side first (toward the barycenter), then
/// observer side (toward the common node). An empty chain is a normal
/// outcome: the target is the observer, or the loaded data holds no path
/// between them at the epoch.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentChain {
    target: i32,
    observer: i32,
    epoch: f64,
    segments: Vec<LocatedSegment>,
    common_node: Option<i32>,
    target_bodies: Vec<i32>,
    observer_bodies: Vec<i32>,
}

impl SegmentChain {
    pub(crate) fn empty(target: i32, observer: i32, epoch: f64) -> Self {
        SegmentChain {
            target,
            observer,
            epoch,
            segments: Vec::new(),
            common_node: None,
            target_bodies: Vec::new(),
            observer_bodies: Vec::new(),
        }
    }

    pub(crate) fn linked(
        target: i32,
        observer: i32,
        epoch: f64,
        segments: Vec<LocatedSegment>,
        common_node: i32,
        target_bodies: Vec<i32>,
        observer_bodies: Vec<i32>,
    ) -> Self {
        SegmentChain {
            target,
            observer,
            epoch,
            segments,
            common_node: Some(common_node),
            target_bodies,
            observer_bodies,
        }
    }

    pub fn target(&self) -> i32 {
        self.target
    }

    pub fn observer(&self) -> i32 {
        self.observer
    }

    /// Requested epoch, ET seconds past J2000.
    pub fn epoch(&self) -> f64 {
        self.epoch
    }

    /// Number of segments; `0` for an empty chain.
    pub fn count(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Located segments in chain order.
    ///
    /// See also
    /// ------------
    /// * [`Self::handles`] – Only the kernel handles, same order.
    /// * [`Self::descriptors`] – Only the descriptors, same order.
    pub fn segments(&self) -> &[LocatedSegment] {
        &self.segments
    }

    /// Handle of the kernel each segment was found in.
    pub fn handles(&self) -> Vec<Handle> {
        self.segments.iter().map(|s| s.handle).collect()
    }

    /// Descriptor of each segment; following `target -> center` links from
    /// either end leads to the common node.
    pub fn descriptors(&self) -> Vec<SegmentDescriptor> {
        self.segments.iter().map(|s| s.descriptor).collect()
    }

    /// First body shared by both center-of-motion chains, if one was found.
    pub fn common_node(&self) -> Option<i32> {
        self.common_node
    }

    /// Bodies visited from the target, target first.
    pub fn target_bodies(&self) -> &[i32] {
        &self.target_bodies
    }

    /// Bodies visited from the observer, observer first, common node last.
    pub fn observer_bodies(&self) -> &[i32] {
        &self.observer_bodies
    }
}

impl fmt::Display for SegmentChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "+{:-^78}+",
            format!(
                " {} relative to {} ",
                BodyLabel(self.target),
                BodyLabel(self.observer)
            )
        )?;
        writeln!(
            f,
            "| {:<76} |",
            format!("Epoch: {}", Epoch::from_et_seconds(self.epoch))
        )?;

        match self.common_node {
            None => writeln!(f, "| {:<76} |", "No segment chain")?,
            Some(node) => {
                writeln!(
                    f,
                    "| {:<76} |",
                    format!("Common node: {}", BodyLabel(node))
                )?;
                writeln!(f, "| {:<76} |", format!("Segments: {}", self.count()))?;
                for (i, s) in self.segments.iter().enumerate() {
                    writeln!(
                        f,
                        "| {:<76} |",
                        format!(
                            "{:>3}. {} -> {}  [handle {}]",
                            i + 1,
                            BodyLabel(s.descriptor.target),
                            BodyLabel(s.descriptor.center),
                            s.handle
                        )
                    )?;
                }
            }
        }

        writeln!(f, "+{:-^78}+", "")
    }
}
