//! Benchmark for one particle field frame.
//!
//! TARGET: a 60-particle frame (update + O(n²) linking + draw calls) well
//! under 1ms, leaving the rest of the 16ms budget to the page.
//!
//! Run with: cargo bench --package lustre_core --bench particle_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lustre_core::config::ParticleConfig;
use lustre_core::effects::ParticleField;
use lustre_core::mock::RecordingCanvas;
use lustre_core::Viewport;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn benchmark_frame(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let mut field = ParticleField::new(ParticleConfig::default(), Viewport::new(1920.0, 1080.0), &mut rng);
    let mut canvas = RecordingCanvas::new();

    c.bench_function("particle_frame_60", |b| {
        b.iter(|| {
            canvas.reset();
            field.frame(black_box(&mut canvas));
        });
    });
}

fn benchmark_links(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let field = ParticleField::new(ParticleConfig::default(), Viewport::new(1920.0, 1080.0), &mut rng);

    c.bench_function("particle_links_60", |b| {
        b.iter(|| black_box(field.links().count()));
    });
}

criterion_group!(benches, benchmark_frame, benchmark_links);
criterion_main!(benches);
