//! Running a playback engine inside an output stream.

use keywave_synth::{PlaybackEngine, StreamTime};

use crate::backend::{AudioBackend, BackendStreamConfig, StreamHandle};
use crate::{Error, Result};

/// Adapts the mono engine to an interleaved multi-channel device buffer.
///
/// The engine renders into a mono scratch buffer sized for the configured
/// buffer length, which is then copied to every channel. The scratch buffer
/// only grows if the device hands over more frames than configured.
#[derive(Debug)]
pub struct OutputRenderer {
    engine: PlaybackEngine,
    channels: usize,
    scratch: Vec<f32>,
    sample_rate: f64,
    frames_rendered: u64,
}

impl OutputRenderer {
    /// Create a renderer for `channels` interleaved channels.
    pub fn new(engine: PlaybackEngine, channels: u16, buffer_size: u32) -> Self {
        let sample_rate = f64::from(engine.config().sample_rate);
        Self {
            engine,
            channels: usize::from(channels.max(1)),
            scratch: vec![0.0; buffer_size as usize],
            sample_rate,
            frames_rendered: 0,
        }
    }

    /// Fill an interleaved buffer; trailing samples that do not make up a
    /// whole frame are silenced.
    pub fn render(&mut self, data: &mut [f32]) {
        let frames = data.len() / self.channels;
        if frames > self.scratch.len() {
            self.scratch.resize(frames, 0.0);
        }

        let time = StreamTime {
            elapsed_seconds: self.frames_rendered as f64 / self.sample_rate,
        };
        let mono = &mut self.scratch[..frames];
        // The engine always asks to continue; stopping is done by dropping the stream.
        let _ = self.engine.process(mono, time);
        self.frames_rendered += frames as u64;

        for (frame, &sample) in data.chunks_exact_mut(self.channels).zip(mono.iter()) {
            frame.fill(sample);
        }
        data[frames * self.channels..].fill(0.0);
    }

    /// Frames written so far.
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// The wrapped engine.
    pub fn engine(&self) -> &PlaybackEngine {
        &self.engine
    }
}

/// An output stream playing a [`PlaybackEngine`].
///
/// Playback runs until this value is dropped. Parameter changes reach the
/// engine through its shared parameter store.
#[derive(Debug)]
pub struct Playback {
    _stream: StreamHandle,
    sample_rate: u32,
    channels: u16,
}

impl Playback {
    /// Start an output stream on `backend` driven by `engine`.
    ///
    /// Fails when the engine was configured for a different sample rate than
    /// the backend will run at, since pitch would be off.
    pub fn start(
        backend: &dyn AudioBackend,
        config: &BackendStreamConfig,
        engine: PlaybackEngine,
    ) -> Result<Self> {
        let sample_rate = backend.actual_sample_rate(config);
        let engine_rate = engine.config().sample_rate;
        if (engine_rate - sample_rate as f32).abs() > 0.5 {
            return Err(Error::InvalidConfig(format!(
                "engine runs at {} Hz but the stream runs at {} Hz",
                engine_rate, sample_rate
            )));
        }

        let mut renderer = OutputRenderer::new(engine, config.channels, config.buffer_size);
        let stream = backend.build_output_stream(
            config,
            Box::new(move |data: &mut [f32]| renderer.render(data)),
            Box::new(|err: &str| tracing::error!(error = err, "output stream error")),
        )?;

        tracing::info!(
            backend = backend.name(),
            sample_rate,
            channels = config.channels,
            "playback started"
        );
        Ok(Self {
            _stream: stream,
            sample_rate,
            channels: config.channels,
        })
    }

    /// Stream sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Interleaved channel count.
    pub fn channels(&self) -> u16 {
        self.channels
    }
}

impl Drop for Playback {
    fn drop(&mut self) {
        tracing::info!("playback stopped");
    }
}
