//! # spkchain
//!
//! Locate the chain of SPK ephemeris segments needed to express the state
//! of a target body relative to an observer at a given epoch.
//!
//! Segments are read from DAF/SPK kernels loaded in a
//! [`KernelRegistry`](crate::kernel::registry::KernelRegistry). Starting from
//! each body, the resolver follows the segments' centers of motion until the
//! two chains meet at a common body.
//!
//! ```rust
//! use spkchain::chain::resolver::resolve_segment_chain;
//! use spkchain::kernel::{descriptor::SegmentDescriptor, registry::KernelRegistry};
//!
//! let segment = |target, center| SegmentDescriptor {
//!     start_epoch: -1e9,
//!     end_epoch: 1e9,
//!     target,
//!     center,
//!     frame_id: 1,
//!     data_type: 2,
//!     initial_addr: 1,
//!     final_addr: 2,
//! };
//!
//! let mut registry = KernelRegistry::new();
//! registry
//!     .load_segments("earth-moon", vec![segment(3, 0), segment(399, 3), segment(301, 3)])
//!     .unwrap();
//!
//! let chain = resolve_segment_chain(&registry, 399, 301, 0.0).unwrap();
//! assert_eq!(chain.count(), 3);
//! assert_eq!(chain.common_node(), Some(3));
//! ```

pub mod chain;
pub mod config;
pub mod constants;
pub mod kernel;
pub mod spkchain;
pub mod spkchain_errors;
