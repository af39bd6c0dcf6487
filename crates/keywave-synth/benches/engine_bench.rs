//! Criterion benchmarks for keywave-synth
//!
//! Run with: cargo bench -p keywave-synth

use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use keywave_synth::{
    EngineConfig, PlaybackEngine, PlaybackParams, SolverOptions, WaveformKind,
    calculate_decay_factor, engine_at,
};

const SAMPLE_RATE: f32 = 44100.0;
const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512, 1024];

// ============================================================================
// Engine fill benchmarks
// ============================================================================

fn bench_fill_waveforms(c: &mut Criterion) {
    let mut group = c.benchmark_group("Fill");

    for kind in WaveformKind::ALL {
        for &block_size in BLOCK_SIZES {
            let mut engine = engine_at(SAMPLE_RATE, 261.63, kind);
            let mut buffer = vec![0.0f32; block_size];

            group.bench_with_input(
                BenchmarkId::new(kind.name(), block_size),
                &block_size,
                |b, _| {
                    b.iter(|| {
                        engine.fill(black_box(&mut buffer));
                        black_box(buffer[0])
                    })
                },
            );
        }
    }

    group.finish();
}

fn bench_fill_kick(c: &mut Criterion) {
    let mut group = c.benchmark_group("Fill_Kick");

    for &block_size in BLOCK_SIZES {
        let params = Arc::new(PlaybackParams::new(55.0, WaveformKind::Sine));
        params.set_kick_decay_factor(0.93);
        params.set_kick_enabled(true);
        let mut engine = PlaybackEngine::new(EngineConfig::default(), params);
        let mut buffer = vec![0.0f32; block_size];

        group.bench_with_input(
            BenchmarkId::new("sine", block_size),
            &block_size,
            |b, _| {
                b.iter(|| {
                    engine.fill(black_box(&mut buffer));
                    black_box(buffer[0])
                })
            },
        );
    }

    group.finish();
}

// ============================================================================
// Decay solver benchmark
// ============================================================================

fn bench_decay_solver(c: &mut Criterion) {
    let mut group = c.benchmark_group("DecaySolver");
    group.sample_size(10);

    group.bench_function("5000_to_440", |b| {
        b.iter(|| {
            black_box(calculate_decay_factor(
                SAMPLE_RATE,
                black_box(5000.0),
                black_box(440.0),
                11025,
                SolverOptions::default(),
            ))
        })
    });

    group.finish();
}

criterion_group!(benches, bench_fill_waveforms, bench_fill_kick, bench_decay_solver);
criterion_main!(benches);
