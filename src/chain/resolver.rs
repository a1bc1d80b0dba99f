//! Segment-chain resolution.
//!
//! To express the state of a target relative to an observer from SPK data,
//! both bodies must be linked to a common body through segments: the target
//! relative to its center, that center relative to its own center, and so on.
//! [`ChainResolver::resolve`] collects those segments:
//!
//! 1. walk from the target toward the barycenter (body 0), recording every
//!    body visited;
//! 2. walk from the observer until it reaches one of those bodies, the
//!    **common node**;
//! 3. return both segment lists concatenated, or an empty chain if no common
//!    node exists.
//!
//! ```text
//!   399 (Earth) ──► 3 (EMB) ──► 0 (SSB)      target walk
//!   301 (Moon)  ──► 3 (EMB)                  observer walk, common node 3
//! ```
//!
//! An empty chain is not an error. Locator failures and capacity overflows
//! are, and they abort the resolution.

use log::debug;

use crate::{config::ResolverConfig, spkchain_errors::SpkChainError};

use super::{
    builder::{walk, WalkSide, WalkStop},
    locator::SegmentLocator,
    segment_chain::SegmentChain,
};

#[derive(Debug, Clone)]
pub struct ChainResolver<L> {
    locator: L,
    config: ResolverConfig,
}

impl<L: SegmentLocator> ChainResolver<L> {
    /// Arguments
    /// -----------------
    /// * `locator`: segment source, usually a `&KernelRegistry`.
    /// * `config`: capacity bounds of every resolution.
    pub fn new(locator: L, config: ResolverConfig) -> Self {
        ChainResolver { locator, config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Find the segments linking `target` and `observer` at `epoch`.
    ///
    /// Arguments
    /// -----------------
    /// * `target`: NAIF ID of the target body.
    /// * `observer`: NAIF ID of the observing body.
    /// * `epoch`: ET seconds past J2000.
    ///
    /// Return
    /// ----------
    /// * A [`SegmentChain`]; it is empty when `target == observer` or when the
    ///   observer chain never meets the target chain.
    /// * [`SpkChainError::CapacityExceeded`] if a bound of the configuration
    ///   is too small for the chain, or any error raised by the locator.
    pub fn resolve(
        &self,
        target: i32,
        observer: i32,
        epoch: f64,
    ) -> Result<SegmentChain, SpkChainError> {
        if target == observer {
            debug!("target and observer are both {target}: nothing to resolve");
            return Ok(SegmentChain::empty(target, observer, epoch));
        }

        let mut segments = Vec::new();

        let target_walk = walk(
            &self.locator,
            &self.config,
            target,
            epoch,
            WalkSide::Target { observer },
            &mut segments,
        )?;

        let observer_walk = walk(
            &self.locator,
            &self.config,
            observer,
            epoch,
            WalkSide::Observer {
                target_chain: &target_walk.bodies,
            },
            &mut segments,
        )?;

        match observer_walk.stop {
            WalkStop::CommonNode(node) => {
                debug!(
                    "{target} relative to {observer}: {} segments, common node {node}",
                    segments.len()
                );
                Ok(SegmentChain::linked(
                    target,
                    observer,
                    epoch,
                    segments,
                    node,
                    target_walk.bodies,
                    observer_walk.bodies,
                ))
            }
            stop => {
                debug!(
                    "{target} relative to {observer}: no common node ({stop}), dropping {} segments",
                    segments.len()
                );
                Ok(SegmentChain::empty(target, observer, epoch))
            }
        }
    }
}

/// Resolve a chain with the default bounds.
///
/// See also
/// ------------
/// * [`ChainResolver::resolve`] – Same operation with an explicit configuration.
pub fn resolve_segment_chain<L: SegmentLocator + ?Sized>(
    locator: &L,
    target: i32,
    observer: i32,
    epoch: f64,
) -> Result<SegmentChain, SpkChainError> {
    ChainResolver::new(locator, ResolverConfig::default()).resolve(target, observer, epoch)
}
