//! # SpkChain: loaded kernels and chain resolution behind one lock
//!
//! [`SpkChain`] is the entry point for applications that load and unload
//! kernels while resolving segment chains, possibly from several threads.
//!
//! The kernel registry is process-wide mutable state. A resolution is only
//! meaningful if the registry does not change while both walks run, so the
//! facade serializes access:
//!
//! - loads and unloads take the **write** lock;
//! - a resolution holds the **read** lock for the whole call, so concurrent
//!   resolutions may run in parallel but never overlap a load or unload.
//!
//! ## Typical usage
//!
//! ```rust, no_run
//! use camino::Utf8Path;
//! use hifitime::Epoch;
//! use spkchain::{config::ResolverConfig, spkchain::SpkChain};
//!
//! let spk = SpkChain::new(ResolverConfig::default());
//! spk.load_kernel(Utf8Path::new("de440s.bsp")).unwrap();
//!
//! let epoch = Epoch::from_gregorian_str("2024-04-10T12:30:45 TDB").unwrap();
//! let chain = spk.resolve(399, 301, &epoch).unwrap();
//! println!("{chain}");
//! ```
//!
//! ## See also
//! ------------
//! * [`KernelRegistry`] – Unsynchronized registry, for single-threaded use.
//! * [`ChainResolver`] – Resolution over any [`SegmentLocator`](crate::chain::locator::SegmentLocator).

use camino::Utf8Path;
use hifitime::Epoch;
use parking_lot::RwLock;

use crate::{
    chain::{resolver::ChainResolver, segment_chain::SegmentChain},
    config::ResolverConfig,
    kernel::{
        descriptor::SegmentDescriptor,
        registry::{Handle, KernelRegistry},
    },
    spkchain_errors::SpkChainError,
};

#[derive(Debug, Default)]
pub struct SpkChain {
    config: ResolverConfig,
    registry: RwLock<KernelRegistry>,
}

impl SpkChain {
    pub fn new(config: ResolverConfig) -> Self {
        SpkChain {
            config,
            registry: RwLock::new(KernelRegistry::new()),
        }
    }

    /// Bounds applied to every resolution of this instance.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Load a DAF/SPK kernel from disk with the highest search priority.
    ///
    /// See also
    /// ------------
    /// * [`KernelRegistry::load_file`] – Reload semantics and errors.
    pub fn load_kernel(&self, path: &Utf8Path) -> Result<Handle, SpkChainError> {
        self.registry.write().load_file(path)
    }

    /// Register in-memory descriptors as a kernel with the highest search priority.
    pub fn load_segments(
        &self,
        name: &str,
        descriptors: Vec<SegmentDescriptor>,
    ) -> Result<Handle, SpkChainError> {
        self.registry.write().load_segments(name, descriptors)
    }

    /// Remove a kernel from the search.
    ///
    /// Waits for running resolutions to finish before the kernel goes away.
    ///
    /// Return
    /// ----------
    /// * [`SpkChainError::UnknownHandle`] if `handle` is not loaded.
    pub fn unload(&self, handle: Handle) -> Result<(), SpkChainError> {
        self.registry.write().unload(handle)
    }

    /// Resolve the segment chain of `target` relative to `observer` at `epoch`.
    ///
    /// Arguments
    /// -----------------
    /// * `target`, `observer`: NAIF body IDs.
    /// * `epoch`: any [`Epoch`]; converted to ET seconds past J2000.
    ///
    /// Return
    /// ----------
    /// * See [`ChainResolver::resolve`].
    pub fn resolve(
        &self,
        target: i32,
        observer: i32,
        epoch: &Epoch,
    ) -> Result<SegmentChain, SpkChainError> {
        self.resolve_et(target, observer, epoch.to_et_seconds())
    }

    /// Same as [`Self::resolve`] with an epoch in ET seconds past J2000.
    pub fn resolve_et(
        &self,
        target: i32,
        observer: i32,
        et_seconds: f64,
    ) -> Result<SegmentChain, SpkChainError> {
        let registry = self.registry.read();
        ChainResolver::new(&*registry, self.config).resolve(target, observer, et_seconds)
    }

    /// Merged coverage windows of `body`, in ET seconds.
    ///
    /// See also
    /// ------------
    /// * [`KernelRegistry::coverage`] – Merge rules.
    pub fn coverage(&self, body: i32) -> Vec<(f64, f64)> {
        self.registry.read().coverage(body)
    }

    /// Merged coverage windows of `body`, as epochs.
    pub fn coverage_epochs(&self, body: i32) -> Vec<(Epoch, Epoch)> {
        self.coverage(body)
            .into_iter()
            .map(|(start, end)| (Epoch::from_et_seconds(start), Epoch::from_et_seconds(end)))
            .collect()
    }

    /// Distinct target bodies of the loaded kernels, sorted.
    pub fn bodies(&self) -> Vec<i32> {
        self.registry.read().bodies()
    }

    /// Loaded kernel handles, highest search priority first.
    pub fn handles(&self) -> Vec<Handle> {
        self.registry.read().handles()
    }

}
