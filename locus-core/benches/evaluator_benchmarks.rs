//! Criterion benchmarks for the recommendation engine.
//!
//! Measures the full `Recommender::locate` pipeline across amenity counts and
//! the parallel evaluator across worker counts.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench --package locus-core
//! ```

// Criterion macros generate code that triggers missing_docs warnings.
#![allow(missing_docs, reason = "Criterion macros generate undocumented code")]

use std::num::NonZeroUsize;
use std::time::Duration;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use geo::Coord;
use locus_core::test_support::{FixedGeocoder, LinearTravelTimeProvider, MemoryPlaces};
use locus_core::{
    CandidateScorer, NormalizationBounds, ParallelEvaluator, PreferenceWeights, Recommender,
    WeightedCostScorer,
};


use bench_support::{AREA_CENTRE, BENCHMARK_SEED, generate_amenities, generate_candidates};

/// Amenity counts fed to the full pipeline.
const AMENITY_COUNTS: &[usize] = &[30, 120, 480];

/// Worker counts for the evaluator benchmark.
const WORKER_COUNTS: &[usize] = &[1, 2, 4, 8];

/// Candidates scored per evaluator iteration (five full 5x5 grids).
const CANDIDATES: usize = 125;

const ORIGIN: Coord<f64> = Coord {
    x: 13.38,
    y: 52.51,
};

fn preferences() -> PreferenceWeights {
    PreferenceWeights::new(1.0, 1.0).unwrap_or_else(|err| panic!("{err}"))
}

/// Benchmark clustering, grid expansion, travel-time lookup and scoring.
fn bench_locate(c: &mut Criterion) {
    let mut group = c.benchmark_group("locate");
    group.sample_size(50);
    group.measurement_time(Duration::from_secs(10));

    let recommender = Recommender::new(
        MemoryPlaces::new(),
        LinearTravelTimeProvider::default(),
        FixedGeocoder::new(AREA_CENTRE),
    );
    for &count in AMENITY_COUNTS {
        let amenities = generate_amenities(count, BENCHMARK_SEED);

        #[expect(clippy::as_conversions, reason = "Safe conversion for small sizes")]
        let throughput_size = count as u64;
        group.throughput(Throughput::Elements(throughput_size));
        group.bench_with_input(BenchmarkId::new("amenities", count), &count, |b, _| {
            b.iter(|| {
                #[expect(
                    clippy::let_underscore_must_use,
                    reason = "Benchmarking locate performance, result is intentionally discarded"
                )]
                let _ = recommender.locate(ORIGIN, &amenities, preferences());
            });
        });
    }

    group.finish();
}

/// Benchmark the parallel minimum search against worker counts.
fn bench_evaluator(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluator");
    let amenities = generate_amenities(120, BENCHMARK_SEED);
    let candidates = generate_candidates(CANDIDATES, BENCHMARK_SEED);
    let scorer = WeightedCostScorer::new(
        &amenities,
        preferences(),
        NormalizationBounds::new(5.0, 20.0),
    );

    for &workers in WORKER_COUNTS {
        let evaluator =
            ParallelEvaluator::new(NonZeroUsize::new(workers).unwrap_or(NonZeroUsize::MIN));
        group.bench_with_input(BenchmarkId::new("workers", workers), &workers, |b, _| {
            b.iter(|| evaluator.minimum(&candidates, |_, candidate| scorer.score(candidate, 12.0)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_locate, bench_evaluator);
criterion_main!(benches);
