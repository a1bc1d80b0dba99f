//! Center-of-motion walk shared by both sides of a resolution.
//!
//! A walk starts at one body, looks up the segment of the current body,
//! records it and moves to the segment's center, until a stop condition
//! holds. The conditions depend on the side:
//!
//! | side     | stops when                                              |
//! |----------|---------------------------------------------------------|
//! | target   | body 0 reached, observer reached, or coverage gap       |
//! | observer | body already in the target chain, body 0, coverage gap  |
//!
//! The shared segment list is bounded by `max_segments` on both sides, and
//! the target chain by `max_chain_bodies`. The observer's visited bodies are
//! only kept for reporting: they grow with the segment list, which bounds
//! them. Running past a bound is an error.

use std::fmt;

use log::debug;

use crate::{
    config::ResolverConfig,
    constants::SSB,
    spkchain_errors::{CapacityKind, SpkChainError},
};

use super::locator::{LocatedSegment, SegmentLocator};

#[derive(Debug, Clone, Copy)]
pub(crate) enum WalkSide<'a> {
    Target { observer: i32 },
    Observer { target_chain: &'a [i32] },
}

/// Why a walk ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkStop {
    ReachedSsb,
    ReachedObserver,
    /// The observer walk reached a body of the target chain.
    CommonNode(i32),
    /// No loaded segment covers this body at the requested epoch.
    CoverageGap(i32),
}

impl fmt::Display for WalkStop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalkStop::ReachedSsb => write!(f, "reached the solar system barycenter"),
            WalkStop::ReachedObserver => write!(f, "reached the observer"),
            WalkStop::CommonNode(body) => write!(f, "common node {body}"),
            WalkStop::CoverageGap(body) => write!(f, "no coverage for body {body}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Walk {
    /// Visited bodies, starting body first.
    pub bodies: Vec<i32>,
    pub stop: WalkStop,
}

/// Walk from `start` toward the barycenter, appending located segments to `segments`.
///
/// Arguments
/// -----------------
/// * `locator`: segment source.
/// * `config`: capacity bounds; `segments` counts toward `max_segments` with
///   whatever it already holds. `max_chain_bodies` applies to the target side.
/// * `start`: first body of the walk.
/// * `epoch`: ET seconds past J2000.
/// * `side`: target or observer stop conditions.
/// * `segments`: shared, growing segment list.
///
/// Return
/// ----------
/// * The visited bodies and the stop reason, or the first locator or
///   capacity error. Locator errors are never mapped to a coverage gap.
pub(crate) fn walk<L: SegmentLocator + ?Sized>(
    locator: &L,
    config: &ResolverConfig,
    start: i32,
    epoch: f64,
    side: WalkSide<'_>,
    segments: &mut Vec<LocatedSegment>,
) -> Result<Walk, SpkChainError> {
    let mut bodies = vec![start];
    let mut current = start;

    let stop = loop {
        match side {
            WalkSide::Target { observer } => {
                if current == SSB {
                    break WalkStop::ReachedSsb;
                }
                if current == observer {
                    break WalkStop::ReachedObserver;
                }
            }
            WalkSide::Observer { target_chain } => {
                if target_chain.contains(&current) {
                    break WalkStop::CommonNode(current);
                }
                if current == SSB {
                    break WalkStop::ReachedSsb;
                }
            }
        }

        let Some(found) = locator.locate(current, epoch)? else {
            break WalkStop::CoverageGap(current);
        };
        check_located(&found, current, epoch)?;

        debug!(
            "{current} -> {} (handle {}, [{}, {}])",
            found.descriptor.center,
            found.handle,
            found.descriptor.start_epoch,
            found.descriptor.end_epoch
        );

        current = found.descriptor.center;
        push_bounded(
            segments,
            found,
            config.max_segments,
            CapacityKind::SegmentList,
        )?;
        match side {
            WalkSide::Target { .. } => push_bounded(
                &mut bodies,
                current,
                config.max_chain_bodies,
                CapacityKind::BodyChain,
            )?,
            WalkSide::Observer { .. } => bodies.push(current),
        }
    };

    debug!("walk from {start} stopped: {stop}");
    Ok(Walk { bodies, stop })
}

/// A locator answer must describe the requested body and cover the epoch.
fn check_located(found: &LocatedSegment, body: i32, epoch: f64) -> Result<(), SpkChainError> {
    let d = &found.descriptor;
    if d.target != body || !d.covers(epoch) {
        return Err(SpkChainError::LocatorFailure(format!(
            "segment for body {} over [{}, {}] returned for body {body} at {epoch}",
            d.target, d.start_epoch, d.end_epoch
        )));
    }
    Ok(())
}

fn push_bounded<T>(
    items: &mut Vec<T>,
    item: T,
    limit: usize,
    kind: CapacityKind,
) -> Result<(), SpkChainError> {
    if items.len() >= limit {
        return Err(SpkChainError::CapacityExceeded {
            kind,
            limit,
            needed: items.len() + 1,
        });
    }
    items.push(item);
    Ok(())
}
