//! Kick decay solver command.

use clap::Args;
use keywave_synth::{Note, calculate_decay_factor};

use super::common::load_config;

#[derive(Args)]
pub struct KickArgs {
    /// Target piano key (1-88); the sweep ends at its frequency
    #[arg(short, long)]
    note: Option<i32>,

    /// Sweep duration in milliseconds
    #[arg(long)]
    sweep_ms: Option<f32>,

    /// Sample rate in Hz
    #[arg(long)]
    sample_rate: Option<u32>,
}

pub fn run(args: KickArgs) -> anyhow::Result<()> {
    let mut config = load_config(None)?;
    if let Some(sample_rate) = args.sample_rate {
        config.sample_rate = sample_rate;
    }
    if let Some(sweep_ms) = args.sweep_ms {
        config.kick.sweep_seconds = sweep_ms / 1000.0;
    }
    if let Some(note) = args.note {
        config.kick.note = note;
    }
    config.validate()?;

    let engine_config = config.engine_config();
    let note = Note::from_key(engine_config.kick.key)?;
    let target_samples = engine_config.kick_sweep_samples();
    let solution = calculate_decay_factor(
        engine_config.sample_rate,
        engine_config.kick.start_frequency_hz,
        note.frequency_hz(),
        target_samples,
        engine_config.kick.solver_options(),
    );

    println!(
        "Sweep: {:.1} Hz -> {} ({:.2} Hz)",
        engine_config.kick.start_frequency_hz,
        note.name(),
        note.frequency_hz()
    );
    println!(
        "Target: {} samples ({:.0} ms at {} Hz)",
        target_samples,
        engine_config.kick.sweep_seconds * 1000.0,
        config.sample_rate
    );
    println!("Decay factor: {:.6}", solution.factor);
    println!("Sweep length: {} samples", solution.total_samples);
    println!("Iterations: {}", solution.iterations);
    if solution.converged {
        println!("Status: converged");
    } else {
        println!("Status: not converged (best estimate)");
    }

    Ok(())
}
