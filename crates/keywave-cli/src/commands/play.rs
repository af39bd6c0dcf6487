//! Interactive player command.

use std::path::PathBuf;

use clap::Args;
use keywave_io::{AudioBackend, BackendStreamConfig, CpalBackend, find_output_device};
use keywave_synth::{SynthController, WaveformKind};

use super::common::load_config;
use crate::session::PlayerSession;
use crate::terminal::{Key, TerminalSession};

#[derive(Args)]
pub struct PlayArgs {
    /// Configuration file (defaults to the user config file)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output device name (partial match)
    #[arg(short, long)]
    device: Option<String>,

    /// Sample rate in Hz
    #[arg(long)]
    sample_rate: Option<u32>,

    /// Buffer size in frames
    #[arg(long)]
    buffer_size: Option<u32>,

    /// Starting waveform (sine, saw)
    #[arg(short, long, value_parser = parse_waveform)]
    waveform: Option<WaveformKind>,

    /// Start with kick mode on
    #[arg(long)]
    kick: bool,
}

fn parse_waveform(s: &str) -> Result<WaveformKind, String> {
    WaveformKind::from_name(s).ok_or_else(|| format!("unknown waveform '{}' (use sine or saw)", s))
}

pub fn run(args: PlayArgs) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(sample_rate) = args.sample_rate {
        config.sample_rate = sample_rate;
    }
    if let Some(buffer_size) = args.buffer_size {
        config.buffer_size = buffer_size;
    }
    if args.device.is_some() {
        config.device = args.device;
    }
    if let Some(waveform) = args.waveform {
        config.waveform = waveform.name().to_string();
    }
    config.validate()?;

    let backend = CpalBackend::new();
    let device = match &config.device {
        Some(name) => Some(find_output_device(name)?),
        None => backend.default_output_device()?,
    };
    let channels = device.as_ref().map_or(2, |d| d.channels);
    if let Some(device) = &device {
        tracing::info!(device = %device.name, channels, "output device");
    }

    let stream_config = BackendStreamConfig {
        sample_rate: config.sample_rate,
        buffer_size: config.buffer_size,
        channels,
        device_name: device.map(|d| d.name),
    };

    let mut controller = SynthController::new(config.engine_config(), config.octave);
    controller.set_waveform_kind(config.waveform_kind()?);
    if args.kick {
        controller.set_kick_enabled(true);
    }

    let mut session = PlayerSession::new(&backend, stream_config, controller);
    let mut terminal = TerminalSession::enter()?;
    terminal.draw(&session.lines())?;

    loop {
        let key = match terminal.next_key()? {
            Key::Interrupt => break,
            Key::Char(c) => c,
        };
        if !session.handle_key(key) {
            break;
        }
        terminal.draw(&session.lines())?;
    }

    tracing::debug!(
        note = %session.controller().note().name(),
        playing = session.is_playing(),
        "player closed"
    );
    Ok(())
}
