//! Registry of loaded SPK kernels.
//!
//! The registry owns every loaded kernel and hands out [`Handle`]s for them.
//! Load order defines search priority: the most recently loaded kernel is
//! searched first, and inside one kernel the descriptor stored last is
//! searched first. The registry is the [`SegmentLocator`] used by the chain
//! resolver.
//!
//! Kernels come either from DAF/SPK files ([`KernelRegistry::load_file`]) or
//! from descriptors built in memory ([`KernelRegistry::load_segments`]).

use std::fmt;

use camino::{Utf8Path, Utf8PathBuf};
use itertools::Itertools;
use log::{info, warn};

use crate::{
    chain::locator::{LocatedSegment, SegmentLocator},
    spkchain_errors::SpkChainError,
};

use super::{daf_file::DafFile, descriptor::SegmentDescriptor};

/// Opaque identifier of one loaded kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(pub(crate) i32);

impl Handle {
    pub fn id(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct LoadedKernel {
    handle: Handle,
    name: String,
    path: Option<Utf8PathBuf>,
    descriptors: Vec<SegmentDescriptor>,
}

#[derive(Debug, Clone, Default)]
pub struct KernelRegistry {
    /// Load order: the last entry has the highest priority.
    kernels: Vec<LoadedKernel>,
    last_handle: i32,
}

impl KernelRegistry {
    pub fn new() -> Self {
        KernelRegistry::default()
    }

    /// Load a DAF/SPK kernel from disk.
    ///
    /// Loading a path that is already loaded re-reads it and moves it to the
    /// highest priority; it keeps its handle.
    ///
    /// Arguments
    /// -----------------
    /// * `path`: location of the kernel.
    ///
    /// Return
    /// ----------
    /// * The kernel handle, or the error that prevented reading the file.
    ///   On error the registry is left unchanged.
    ///
    /// See also
    /// ------------
    /// * [`DafFile::open`] – Validation applied to the file.
    pub fn load_file(&mut self, path: &Utf8Path) -> Result<Handle, SpkChainError> {
        let daf = DafFile::open(path)?;

        let handle = match self.position_of_path(path) {
            Some(idx) => {
                let previous = self.kernels.remove(idx);
                warn!("{path} is already loaded as {}, reloading it", previous.handle);
                previous.handle
            }
            None => self.next_handle()?,
        };

        info!(
            "loaded {path} as {handle}: {} segments",
            daf.descriptors().len()
        );
        self.kernels.push(LoadedKernel {
            handle,
            name: daf.internal_filename().to_string(),
            path: Some(path.to_path_buf()),
            descriptors: daf.descriptors,
        });
        Ok(handle)
    }

    /// Register descriptors built in memory as a new kernel.
    ///
    /// Arguments
    /// -----------------
    /// * `name`: label of the kernel in reports.
    /// * `descriptors`: segments, in file order (the last one has priority).
    ///
    /// Return
    /// ----------
    /// * The kernel handle, or [`SpkChainError::CorruptDescriptor`] if one
    ///   descriptor has a reversed time span.
    /// * [`SpkChainError::HandlesExhausted`] once every positive handle
    ///   has been issued.
    pub fn load_segments(
        &mut self,
        name: &str,
        descriptors: Vec<SegmentDescriptor>,
    ) -> Result<Handle, SpkChainError> {
        for descriptor in &descriptors {
            descriptor.validate()?;
        }
        let handle = self.next_handle()?;
        info!("loaded {name} as {handle}: {} segments", descriptors.len());
        self.kernels.push(LoadedKernel {
            handle,
            name: name.to_string(),
            path: None,
            descriptors,
        });
        Ok(handle)
    }

    /// Remove a kernel from the search.
    ///
    /// Handles are never reissued, so a stale handle cannot reach a kernel
    /// loaded later.
    ///
    /// Return
    /// ----------
    /// * [`SpkChainError::UnknownHandle`] if `handle` is not loaded.
    pub fn unload(&mut self, handle: Handle) -> Result<(), SpkChainError> {
        let idx = self
            .kernels
            .iter()
            .position(|k| k.handle == handle)
            .ok_or(SpkChainError::UnknownHandle(handle))?;
        let kernel = self.kernels.remove(idx);
        info!("unloaded {} ({handle})", kernel.name);
        Ok(())
    }

    /// Handles in search order, highest priority first.
    pub fn handles(&self) -> Vec<Handle> {
        self.kernels.iter().rev().map(|k| k.handle).collect()
    }

    /// Internal file name of a DAF kernel, or the label given to
    /// [`Self::load_segments`]. `None` for an unknown handle.
    pub fn kernel_name(&self, handle: Handle) -> Option<&str> {
        self.find(handle).map(|k| k.name.as_str())
    }

    /// Path a kernel was read from; `None` for in-memory kernels.
    pub fn kernel_path(&self, handle: Handle) -> Option<&Utf8Path> {
        self.find(handle).and_then(|k| k.path.as_deref())
    }

    /// Descriptors of one kernel, in file order.
    pub fn descriptors(&self, handle: Handle) -> Option<&[SegmentDescriptor]> {
        self.find(handle).map(|k| k.descriptors.as_slice())
    }

    /// Number of loaded kernels.
    pub fn len(&self) -> usize {
        self.kernels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kernels.is_empty()
    }

    /// Distinct target bodies over all loaded kernels, sorted.
    pub fn bodies(&self) -> Vec<i32> {
        self.kernels
            .iter()
            .flat_map(|k| k.descriptors.iter().map(|d| d.target))
            .sorted()
            .dedup()
            .collect()
    }

    /// Time windows covered by segments of `body`, merged and sorted.
    ///
    /// Overlapping or touching intervals are joined, so the result is a list
    /// of disjoint `(start, end)` pairs in ET seconds.
    pub fn coverage(&self, body: i32) -> Vec<(f64, f64)> {
        self.kernels
            .iter()
            .flat_map(|k| k.descriptors.iter())
            .filter(|d| d.target == body)
            .map(|d| (d.start_epoch, d.end_epoch))
            .sorted_by(|a, b| a.0.total_cmp(&b.0))
            .coalesce(|a, b| {
                if b.0 <= a.1 {
                    Ok((a.0, a.1.max(b.1)))
                } else {
                    Err((a, b))
                }
            })
            .collect()
    }

    fn find(&self, handle: Handle) -> Option<&LoadedKernel> {
        self.kernels.iter().find(|k| k.handle == handle)
    }

    fn position_of_path(&self, path: &Utf8Path) -> Option<usize> {
        self.kernels
            .iter()
            .position(|k| k.path.as_deref() == Some(path))
    }

    fn next_handle(&mut self) -> Result<Handle, SpkChainError> {
        self.last_handle = self
            .last_handle
            .checked_add(1)
            .ok_or(SpkChainError::HandlesExhausted(self.last_handle))?;
        Ok(Handle(self.last_handle))
    }
}

impl SegmentLocator for KernelRegistry {
    fn locate(&self, body: i32, epoch: f64) -> Result<Option<LocatedSegment>, SpkChainError> {
        let found = self.kernels.iter().rev().find_map(|kernel| {
            kernel
                .descriptors
                .iter()
                .rev()
                .find(|d| d.target == body && d.covers(epoch))
                .map(|d| LocatedSegment {
                    handle: kernel.handle,
                    descriptor: *d,
                })
        });
        Ok(found)
    }
}

#[cfg(test)]
mod test_registry {
    use super::*;
    use crate::kernel::daf_file::test_daf_file::descriptor;

    #[test]
    fn test_later_kernel_wins() {
        let mut registry = KernelRegistry::new();
        let old = registry
            .load_segments("old", vec![descriptor(399, 3, 0.0, 100.0)])
            .unwrap();
        let new = registry
            .load_segments("new", vec![descriptor(399, 3, 50.0, 150.0)])
            .unwrap();

        let hit = registry.locate(399, 75.0).unwrap().unwrap();
        assert_eq!(hit.handle, new);
        assert_eq!(hit.descriptor.start_epoch, 50.0);

        // Only the old kernel covers epoch 10.
        let hit = registry.locate(399, 10.0).unwrap().unwrap();
        assert_eq!(hit.handle, old);

        assert_eq!(registry.locate(399, 200.0), Ok(None));
        assert_eq!(registry.locate(301, 75.0), Ok(None));
    }

    #[test]
    fn test_last_segment_of_a_kernel_wins() {
        let mut registry = KernelRegistry::new();
        registry
            .load_segments(
                "one",
                vec![descriptor(5, 0, 0.0, 10.0), descriptor(5, 10, 0.0, 10.0)],
            )
            .unwrap();
        let hit = registry.locate(5, 5.0).unwrap().unwrap();
        assert_eq!(hit.descriptor.center, 10);
    }

    #[test]
    fn test_unload() {
        let mut registry = KernelRegistry::new();
        let a = registry
            .load_segments("a", vec![descriptor(399, 3, 0.0, 100.0)])
            .unwrap();
        let b = registry
            .load_segments("b", vec![descriptor(399, 3, 0.0, 100.0)])
            .unwrap();
        assert_eq!(registry.handles(), vec![b, a]);

        registry.unload(b).unwrap();
        assert_eq!(registry.locate(399, 1.0).unwrap().unwrap().handle, a);
        assert_eq!(registry.unload(b), Err(SpkChainError::UnknownHandle(b)));

        registry.unload(a).unwrap();
        assert!(registry.is_empty());
        assert_eq!(registry.locate(399, 1.0), Ok(None));
    }

    #[test]
    fn test_handles_are_never_reused() {
        let mut registry = KernelRegistry::new();
        let a = registry.load_segments("a", vec![]).unwrap();
        registry.unload(a).unwrap();
        let b = registry.load_segments("b", vec![]).unwrap();
        assert_ne!(a, b);
        assert_eq!(registry.kernel_name(b), Some("b"));
        assert_eq!(registry.kernel_name(a), None);
    }

    #[test]
    fn test_handles_exhausted() {
        let mut registry = KernelRegistry::new();
        registry.last_handle = i32::MAX - 1;
        let last = registry.load_segments("last", vec![]).unwrap();
        assert_eq!(last.id(), i32::MAX);

        let err = registry
            .load_segments("one too many", vec![descriptor(399, 3, 0.0, 1.0)])
            .unwrap_err();
        assert_eq!(err, SpkChainError::HandlesExhausted(i32::MAX));
        assert_eq!(registry.handles(), vec![last]);
        assert_eq!(registry.locate(399, 0.5), Ok(None));
    }

    #[test]
    fn test_descriptors_of_one_kernel() {
        let mut registry = KernelRegistry::new();
        let segments = vec![descriptor(3, 0, 0.0, 10.0), descriptor(399, 3, 0.0, 10.0)];
        let a = registry.load_segments("a", segments.clone()).unwrap();
        let b = registry
            .load_segments("b", vec![descriptor(301, 3, 0.0, 1.0)])
            .unwrap();

        assert_eq!(registry.descriptors(a), Some(segments.as_slice()));
        assert_eq!(registry.descriptors(b).map(<[_]>::len), Some(1));
        assert_eq!(registry.kernel_path(a), None);
        assert_eq!(registry.len(), 2);

        registry.unload(a).unwrap();
        assert_eq!(registry.descriptors(a), None);
    }

    #[test]
    fn test_reversed_descriptor_not_loaded() {
        let mut registry = KernelRegistry::new();
        let err = registry
            .load_segments("bad", vec![descriptor(1, 0, 2.0, 1.0)])
            .unwrap_err();
        assert!(matches!(err, SpkChainError::CorruptDescriptor { target: 1, .. }));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_bodies_and_coverage() {
        let mut registry = KernelRegistry::new();
        registry
            .load_segments(
                "a",
                vec![
                    descriptor(399, 3, 0.0, 10.0),
                    descriptor(3, 0, 0.0, 100.0),
                    descriptor(399, 3, 30.0, 40.0),
                ],
            )
            .unwrap();
        registry
            .load_segments(
                "b",
                vec![descriptor(399, 3, 5.0, 20.0), descriptor(301, 3, 0.0, 1.0)],
            )
            .unwrap();

        assert_eq!(registry.bodies(), vec![3, 301, 399]);
        assert_eq!(registry.coverage(399), vec![(0.0, 20.0), (30.0, 40.0)]);
        assert_eq!(registry.coverage(3), vec![(0.0, 100.0)]);
        assert!(registry.coverage(10).is_empty());
    }
}
