//! Criterion benchmarks for areatex critical paths
//!
//! Benchmarks the core performance-critical operations:
//! - Orthogonal solver: closed-form areas per pattern shape
//! - Diagonal solver: sampled areas at different grid resolutions
//! - Generator: one full phase slice and a reduced full run
//! - Atlas: packing precomputed tables into the area texture
//! - Codegen: flattening and printing the texture bytes

use areatex::area::{
    area_diag_sampled, area_ortho, AreaResult, DiagPattern, OrthoPattern, SampleGrid,
};
use areatex::atlas::{assemble_area_texture, to_dx9};
use areatex::codegen::{channel_bytes, emit_cpp};
use areatex::generate::{AreaTables, CoverageGrid, GeneratorSettings, TableGenerator};
use areatex::geometry::Vec2;
use areatex::search::generate_search_texture;
use areatex::tables::{SUBSAMPLE_OFFSETS_DIAG, SUBSAMPLE_OFFSETS_ORTHO};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

// =============================================================================
// Test Data Generators
// =============================================================================

/// Tables with a smooth gradient in every grid, sized for the default atlas
fn make_tables() -> AreaTables {
    let settings = GeneratorSettings::default();
    let grid = |size: u32| {
        CoverageGrid::from_fn(size, |l, r| {
            AreaResult::new(l as f64 / size as f64, r as f64 / size as f64)
        })
    };
    AreaTables {
        ortho: vec![vec![grid(settings.ortho_distances); 16]; SUBSAMPLE_OFFSETS_ORTHO.len()],
        diag: vec![vec![grid(settings.diag_distances); 16]; SUBSAMPLE_OFFSETS_DIAG.len()],
    }
}

// =============================================================================
// Solver Benchmarks
// =============================================================================

fn bench_ortho(c: &mut Criterion) {
    let mut group = c.benchmark_group("area_ortho");

    // One representative per shape: corner, U, zig-zag, straight line
    for code in [1u32, 3, 6, 7].iter() {
        let pattern = OrthoPattern::new(*code).unwrap();
        group.bench_with_input(BenchmarkId::new("pattern", code), &pattern, |b, &pattern| {
            b.iter(|| area_ortho(black_box(pattern), black_box(12), black_box(30), black_box(0.125)))
        });
    }

    let distances = 226u64;
    let pattern = OrthoPattern::new(12).unwrap();
    group.throughput(Throughput::Elements(distances));
    group.bench_function("row_226", |b| {
        b.iter(|| {
            (0..distances as u32)
                .map(|left| area_ortho(pattern, left, black_box(64), 0.25).r)
                .sum::<f64>()
        })
    });

    group.finish();
}

fn bench_diag(c: &mut Criterion) {
    let mut group = c.benchmark_group("area_diag");
    let pattern = DiagPattern::new(5).unwrap();
    let offset = Vec2::from(SUBSAMPLE_OFFSETS_DIAG[1]);

    // Cost grows with the square of the sample count
    for samples in [10u32, 20, 30, 60].iter() {
        let grid = SampleGrid::new(*samples);
        group.throughput(Throughput::Elements((*samples * *samples) as u64));
        group.bench_with_input(BenchmarkId::new("samples", samples), &grid, |b, grid| {
            b.iter(|| area_diag_sampled(grid, black_box(pattern), black_box(4), black_box(9), offset))
        });
    }

    group.finish();
}

// =============================================================================
// Generator Benchmarks
// =============================================================================

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    group.sample_size(10);

    group.bench_function("ortho_tables", |b| {
        let generator = TableGenerator::new(GeneratorSettings::default());
        b.iter(|| generator.generate_ortho().unwrap())
    });

    let reduced = GeneratorSettings { ortho_distances: 64, diag_samples: 10, ..Default::default() };
    for jobs in [1usize, 4].iter() {
        let generator = TableGenerator::new(reduced.clone()).with_jobs(*jobs);
        group.bench_with_input(BenchmarkId::new("reduced_jobs", jobs), &generator, |b, generator| {
            b.iter(|| generator.generate().unwrap())
        });
    }

    group.finish();
}

// =============================================================================
// Atlas and Output Benchmarks
// =============================================================================

fn bench_atlas(c: &mut Criterion) {
    let mut group = c.benchmark_group("atlas");
    let tables = make_tables();

    group.bench_function("assemble_area_texture", |b| {
        b.iter(|| assemble_area_texture(black_box(&tables)).unwrap())
    });

    let atlas = assemble_area_texture(&tables).unwrap();
    group.bench_function("to_dx9", |b| b.iter(|| to_dx9(black_box(&atlas))));
    group.bench_function("search_texture", |b| b.iter(generate_search_texture));

    group.finish();
}

fn bench_codegen(c: &mut Criterion) {
    let mut group = c.benchmark_group("codegen");
    let atlas = assemble_area_texture(&make_tables()).unwrap();
    let bytes = channel_bytes(&atlas, 2);

    group.throughput(Throughput::Bytes(bytes.len() as u64));
    group.bench_function("channel_bytes", |b| b.iter(|| channel_bytes(black_box(&atlas), 2)));
    group.bench_function("emit_cpp", |b| b.iter(|| emit_cpp("areaTexBytes", black_box(&bytes))));

    group.finish();
}

// =============================================================================
// Criterion Configuration
// =============================================================================

criterion_group!(benches, bench_ortho, bench_diag, bench_generate, bench_atlas, bench_codegen);

criterion_main!(benches);
