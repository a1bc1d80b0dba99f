use criterion::{black_box, criterion_group, criterion_main, Criterion};

use spkchain::{
    chain::resolver::ChainResolver,
    config::ResolverConfig,
    kernel::{descriptor::SegmentDescriptor, registry::KernelRegistry},
};

fn segment(target: i32, center: i32, start: f64, end: f64) -> SegmentDescriptor {
    SegmentDescriptor {
        start_epoch: start,
        end_epoch: end,
        target,
        center,
        frame_id: 1,
        data_type: 2,
        initial_addr: 1,
        final_addr: 2,
    }
}

/// Planetary system split over 30 kernels of 10-day segments each, the way
/// mission kernels pile up over a long campaign.
fn loaded_registry() -> KernelRegistry {
    let mut registry = KernelRegistry::new();
    let day = 86_400.0;
    for k in 0..30 {
        let start = k as f64 * 10.0 * day;
        let end = start + 10.0 * day;
        let mut descriptors = Vec::new();
        for bary in 1..=9 {
            descriptors.push(segment(bary, 0, start, end));
            descriptors.push(segment(bary * 100 + 99, bary, start, end));
        }
        descriptors.push(segment(301, 3, start, end));
        descriptors.push(segment(10, 0, start, end));
        registry
            .load_segments(&format!("kernel-{k}"), descriptors)
            .expect("valid synthetic descriptors");
    }
    registry
}

fn bench_resolve(c: &mut Criterion) {
    let registry = loaded_registry();
    let resolver = ChainResolver::new(&registry, ResolverConfig::default());
    let epoch = 123.0 * 86_400.0;

    c.bench_function("resolve/moon_from_earth", |b| {
        b.iter(|| resolver.resolve(black_box(301), black_box(399), black_box(epoch)))
    });

    c.bench_function("resolve/pluto_from_mercury", |b| {
        b.iter(|| resolver.resolve(black_box(999), black_box(199), black_box(epoch)))
    });

    c.bench_function("resolve/no_coverage", |b| {
        b.iter(|| resolver.resolve(black_box(301), black_box(399), black_box(-1.0)))
    });
}

criterion_group!(benches, bench_resolve);
criterion_main!(benches);
