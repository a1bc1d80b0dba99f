//! Bounds applied by the chain resolver.
//!
//! Both bounds protect the walk against cyclic or runaway center-of-motion
//! graphs: exceeding one is reported as
//! [`SpkChainError::CapacityExceeded`](crate::spkchain_errors::SpkChainError::CapacityExceeded)
//! instead of silently truncating the chain.

use crate::{
    constants::{MAXSEG, MAX_CHAIN_BODIES},
    spkchain_errors::SpkChainError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Maximum number of segments in one resolved chain.
    pub max_segments: usize,
    /// Maximum number of body IDs recorded by one walk, starting body included.
    pub max_chain_bodies: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfig {
            max_segments: MAXSEG,
            max_chain_bodies: MAX_CHAIN_BODIES,
        }
    }
}

impl ResolverConfig {
    /// Build a configuration with explicit bounds.
    ///
    /// Arguments
    /// -----------------
    /// * `max_segments`: capacity of the segment list.
    /// * `max_chain_bodies`: capacity of the body chain of each walk.
    ///
    /// Return
    /// ----------
    /// * The configuration, or [`SpkChainError::InvalidConfig`] if a bound is zero.
    pub fn new(max_segments: usize, max_chain_bodies: usize) -> Result<Self, SpkChainError> {
        ResolverConfig::default()
            .with_max_segments(max_segments)?
            .with_max_chain_bodies(max_chain_bodies)
    }

    pub fn with_max_segments(mut self, max_segments: usize) -> Result<Self, SpkChainError> {
        if max_segments == 0 {
            return Err(SpkChainError::InvalidConfig(
                "max_segments must be at least 1".to_string(),
            ));
        }
        self.max_segments = max_segments;
        Ok(self)
    }

    pub fn with_max_chain_bodies(mut self, max_chain_bodies: usize) -> Result<Self, SpkChainError> {
        // The starting body always occupies one slot.
        if max_chain_bodies < 2 {
            return Err(SpkChainError::InvalidConfig(
                "max_chain_bodies must be at least 2".to_string(),
            ));
        }
        self.max_chain_bodies = max_chain_bodies;
        Ok(self)
    }
}

#[cfg(test)]
mod test_config {
    use super::*;

    #[test]
    fn test_default_bounds() {
        let cfg = ResolverConfig::default();
        assert_eq!(cfg.max_segments, 200);
        assert_eq!(cfg.max_chain_bodies, 100);
    }

    #[test]
    fn test_new_rejects_zero() {
        assert_eq!(
            ResolverConfig::new(0, 10),
            Err(SpkChainError::InvalidConfig(
                "max_segments must be at least 1".to_string()
            ))
        );
        assert!(ResolverConfig::new(10, 1).is_err());
        assert_eq!(
            ResolverConfig::new(10, 20).unwrap(),
            ResolverConfig {
                max_segments: 10,
                max_chain_bodies: 20
            }
        );
    }
}
