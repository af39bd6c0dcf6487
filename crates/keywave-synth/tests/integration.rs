//! Integration tests for keywave-synth crate.
//!
//! Tests cover buffer filling across arbitrary callback sizes, period
//! lengths, the kick envelope driven through the engine, and the controller
//! feeding a running engine.

use std::sync::Arc;

use keywave_synth::{
    EngineConfig, KickPhase, Note, PlaybackEngine, PlaybackParams, SolverOptions,
    SynthController, WaveformKind, calculate_decay_factor, engine_at, note_name, period_samples,
    sweep_length, waveform,
};

const SR: f32 = 44100.0;

/// One unbroken pass of whole periods, sliced to `len` samples.
fn unbroken(period: usize, kind: WaveformKind, len: usize) -> Vec<f32> {
    let one = waveform::generate(period, 0.0, kind, false);
    one.iter().copied().cycle().take(len).collect()
}

fn render(engine: &mut PlaybackEngine, frame_counts: &[usize]) -> Vec<f32> {
    let mut out = Vec::new();
    for &frames in frame_counts {
        let mut buf = vec![0.0f32; frames];
        engine.fill(&mut buf);
        out.extend_from_slice(&buf);
    }
    out
}

// ---------------------------------------------------------------------------
// 1. Phase continuity
// ---------------------------------------------------------------------------

#[test]
fn continuity_sine_odd_buffer_sizes() {
    let mut engine = engine_at(SR, 440.0, WaveformKind::Sine);
    let frames = [333, 17, 256, 1, 99, 101, 512, 3];
    let out = render(&mut engine, &frames);
    let expected = unbroken(100, WaveformKind::Sine, out.len());
    for (i, (a, b)) in out.iter().zip(&expected).enumerate() {
        assert!((a - b).abs() < 1e-6, "sample {}: {} vs {}", i, a, b);
    }
}

#[test]
fn continuity_saw_at_non_divisible_period() {
    // 44100 / 261.63 rounds to 169 samples, coprime with the 64-sample buffers.
    let mut engine = engine_at(SR, 261.63, WaveformKind::Sawtooth);
    assert_eq!(engine.samples_per_period(), 169);
    let out = render(&mut engine, &[64; 40]);
    assert_eq!(out, unbroken(169, WaveformKind::Sawtooth, 64 * 40));
}

#[test]
fn single_buffer_equals_many_small_buffers() {
    let mut big = engine_at(48000.0, 523.25, WaveformKind::Sine);
    let mut small = engine_at(48000.0, 523.25, WaveformKind::Sine);
    let whole = render(&mut big, &[4096]);
    let pieces = render(&mut small, &[4096 / 8; 8]);
    for (a, b) in whole.iter().zip(&pieces) {
        assert!((a - b).abs() < 1e-6);
    }
}

// ---------------------------------------------------------------------------
// 2. Period correctness and note mapping
// ---------------------------------------------------------------------------

#[test]
fn a440_period_is_100_samples() {
    assert_eq!(period_samples(SR, 440.0), 100);
    let engine = engine_at(SR, Note::default().frequency_hz(), WaveformKind::Sine);
    assert_eq!(engine.samples_per_period(), 100);
}

#[test]
fn saw_repeats_every_period() {
    let mut engine = engine_at(SR, 441.0, WaveformKind::Sawtooth);
    let out = render(&mut engine, &[300]);
    assert_eq!(out[0], -1.0);
    assert_eq!(out[100], -1.0);
    assert_eq!(out[200], -1.0);
    assert!(out.iter().all(|s| (-1.0..1.0).contains(s)));
}

#[test]
fn note_round_trip_and_names() {
    let note = Note::from_frequency(440.0).unwrap();
    assert_eq!(note.key(), 49);
    assert_eq!(note.name().to_string(), "A4");
    assert_eq!(note_name(52).to_string(), "C5");
    assert_eq!(note_name(13).to_string(), "A1");
}

// ---------------------------------------------------------------------------
// 3. Kick envelope through the engine
// ---------------------------------------------------------------------------

#[test]
fn kick_decays_monotonically_holds_then_resets() {
    let config = EngineConfig::default();
    let params = Arc::new(PlaybackParams::new(440.0, WaveformKind::Sine));
    let solution = calculate_decay_factor(
        SR,
        config.kick.start_frequency_hz,
        440.0,
        config.kick_sweep_samples(),
        SolverOptions::default(),
    );
    assert!(solution.converged);
    params.set_kick_decay_factor(solution.factor);
    params.set_kick_enabled(true);

    let mut engine = PlaybackEngine::new(config, Arc::clone(&params));
    let mut buf = vec![0.0f32; 256];
    let mut previous = f32::INFINITY;
    let mut seen = Vec::new();

    // Two full kick cycles fit comfortably in 1.5 seconds.
    for _ in 0..(SR as usize * 3 / 2 / 256) {
        engine.fill(&mut buf);
        let kick = engine.kick();
        if seen.last() != Some(&kick.phase()) {
            seen.push(kick.phase());
        }
        if kick.phase() == KickPhase::Decaying && seen.len() == 1 {
            assert!(kick.frequency_hz() <= previous);
            previous = kick.frequency_hz();
        }
        if kick.phase() == KickPhase::Holding {
            assert!(kick.frequency_hz() < 440.0);
        }
        assert!(buf.iter().all(|s| (-1.0..=1.0).contains(s)));
    }

    assert_eq!(seen[0], KickPhase::Decaying);
    assert!(seen.contains(&KickPhase::Holding));
    assert!(
        seen.iter().skip(1).any(|&p| p == KickPhase::Decaying),
        "kick never re-triggered: {:?}",
        seen
    );
}

#[test]
fn solver_reference_sweep_is_within_tolerance() {
    let solution = calculate_decay_factor(SR, 5000.0, 440.0, 11025, SolverOptions::default());
    assert!(solution.converged);
    let total = sweep_length(SR, 5000.0, 440.0, solution.factor).unwrap();
    assert!(total.abs_diff(11025) <= 250);
}

// ---------------------------------------------------------------------------
// 4. Controller driving a running engine
// ---------------------------------------------------------------------------

#[test]
fn controller_changes_reach_engine_on_next_buffer() {
    let mut controller = SynthController::default();
    let mut engine = controller.engine();
    let mut buf = vec![0.0f32; 128];
    engine.fill(&mut buf);
    assert_eq!(engine.samples_per_period(), 100);

    controller.set_note(61).unwrap();
    assert_eq!(engine.samples_per_period(), 50);

    controller.set_waveform_kind(WaveformKind::Sawtooth);
    engine.fill(&mut buf);
    assert!(buf.iter().all(|s| (-1.0..1.0).contains(s)));
}

#[test]
fn controller_piano_roll_octave_walk() {
    let mut controller = SynthController::default();
    let c4 = controller.play_note_index(0).unwrap();
    assert_eq!(c4.name().to_string(), "C4");
    controller.set_octave(1);
    assert_eq!(controller.note().name().to_string(), "C5");
    let b5 = controller.play_note_index(11).unwrap();
    assert_eq!(b5.name().to_string(), "B5");
}

#[test]
fn controller_kick_mode_runs_engine_from_start_frequency() {
    let mut controller = SynthController::default();
    let mut engine = controller.engine();
    let mut buf = vec![0.0f32; 512];
    engine.fill(&mut buf);

    controller.set_kick_enabled(true);
    engine.fill(&mut buf[..1]);
    assert_eq!(engine.kick().frequency_hz(), 5000.0);
    assert_eq!(engine.kick().decay_factor(), controller.params().kick_decay_factor());
}
