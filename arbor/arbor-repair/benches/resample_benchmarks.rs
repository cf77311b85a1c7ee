//! Benchmarks for the resampling engine.
//!
//! Run with: cargo bench -p arbor-repair
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p arbor-repair -- --save-baseline main
//! 2. After changes: cargo bench -p arbor-repair -- --baseline main

#![allow(missing_docs, clippy::cast_precision_loss)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use arbor_repair::{resample_arbor, resample_morphology, ResampleParams};
use arbor_types::{Arbor, Morphology, Point3, Sample, SectionKind, Soma};

// =============================================================================
// Test Arbor Generation
// =============================================================================

/// Create a balanced binary arbor with `depth` levels of bifurcations.
///
/// Each section runs 20 units with a few samples crowding the branch
/// point, so the repair pass has real work to do.
fn create_binary_arbor(kind: SectionKind, depth: u32) -> Arbor {
    fn section_samples(origin: Point3<f64>, direction: (f64, f64, f64)) -> Vec<Sample> {
        let (dx, dy, dz) = direction;
        let at = |t: f64| {
            Sample::new(
                0,
                Point3::new(origin.x + dx * t, origin.y + dy * t, origin.z + dz * t),
                1.0,
            )
        };
        vec![at(0.0), at(0.4), at(1.0), at(10.0), at(20.0)]
    }

    fn grow(arbor: &mut Arbor, parent: usize, origin: Point3<f64>, level: u32, depth: u32) {
        if level >= depth {
            return;
        }
        let spread = 1.0 / f64::from(level + 1);
        for side in [-spread, spread] {
            let direction = (side, 0.0, 1.0);
            let samples = section_samples(origin, direction);
            let tip = samples[samples.len() - 1].position;
            if let Some(child) = arbor.add_child(parent, samples) {
                grow(arbor, child, tip, level + 1, depth);
            }
        }
    }

    let origin = Point3::new(0.0, 0.0, 0.0);
    let mut arbor = Arbor::with_root(kind, section_samples(origin, (0.0, 0.0, 1.0)));
    let tip = arbor.sections[0].samples[4].position;
    grow(&mut arbor, 0, tip, 0, depth);
    arbor.label_primary_children();
    arbor
}

fn create_morphology(arbors_per_type: usize, depth: u32) -> Morphology {
    let mut morphology = Morphology::new(Soma::new(Point3::origin(), 5.0));
    for _ in 0..arbors_per_type {
        morphology
            .basal_dendrites
            .push(create_binary_arbor(SectionKind::BasalDendrite, depth));
        morphology
            .axons
            .push(create_binary_arbor(SectionKind::Axon, depth));
    }
    morphology
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_resample_arbor(c: &mut Criterion) {
    let mut group = c.benchmark_group("resample_arbor");

    for depth in [4, 6, 8] {
        let arbor = create_binary_arbor(SectionKind::BasalDendrite, depth);
        group.bench_with_input(
            BenchmarkId::from_parameter(arbor.sections.len()),
            &arbor,
            |b, arbor| {
                b.iter(|| {
                    let mut working = arbor.clone();
                    let _ = resample_arbor(black_box(&mut working), &ResampleParams::default());
                });
            },
        );
    }

    group.finish();
}

fn bench_resample_morphology(c: &mut Criterion) {
    let mut group = c.benchmark_group("resample_morphology");

    for arbors_per_type in [1, 4] {
        let morphology = create_morphology(arbors_per_type, 6);
        group.bench_with_input(
            BenchmarkId::from_parameter(morphology.arbor_count()),
            &morphology,
            |b, morphology| {
                b.iter(|| {
                    let mut working = morphology.clone();
                    let _ =
                        resample_morphology(black_box(&mut working), &ResampleParams::default());
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_resample_arbor, bench_resample_morphology);
criterion_main!(benches);
