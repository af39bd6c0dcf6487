//! Integration tests for keywave-io playback wiring.
//!
//! A mock backend stands in for the sound card: it runs the output callback
//! synchronously so the rendered audio can be inspected.

use std::sync::{Arc, Mutex};

use keywave_io::{
    AudioBackend, AudioDevice, BackendStreamConfig, Error, ErrorCallback, OutputCallback,
    Playback, Result, StreamHandle,
};
use keywave_synth::{EngineConfig, SynthController, WaveformKind, waveform};

/// Runs the callback `blocks` times on build and records the output.
struct MockBackend {
    blocks: usize,
    sample_rate: u32,
    captured: Arc<Mutex<Vec<f32>>>,
}

impl MockBackend {
    fn new(blocks: usize) -> Self {
        Self {
            blocks,
            sample_rate: 44100,
            captured: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl AudioBackend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    fn list_devices(&self) -> Result<Vec<AudioDevice>> {
        Ok(vec![AudioDevice {
            name: "mock out".to_string(),
            default_sample_rate: self.sample_rate,
            channels: 2,
            is_default: true,
        }])
    }

    fn default_output_device(&self) -> Result<Option<AudioDevice>> {
        Ok(self.list_devices()?.into_iter().next())
    }

    fn build_output_stream(
        &self,
        config: &BackendStreamConfig,
        mut callback: OutputCallback,
        _error_callback: ErrorCallback,
    ) -> Result<StreamHandle> {
        let mut buffer = vec![0.0f32; config.buffer_size as usize * usize::from(config.channels)];
        let mut captured = self.captured.lock().unwrap();
        for _ in 0..self.blocks {
            callback(&mut buffer);
            captured.extend_from_slice(&buffer);
        }
        Ok(StreamHandle::new(()))
    }

    fn actual_sample_rate(&self, _config: &BackendStreamConfig) -> u32 {
        self.sample_rate
    }
}

#[test]
fn playback_renders_continuous_stereo() {
    let controller = SynthController::default();
    let backend = MockBackend::new(5);
    let config = BackendStreamConfig {
        buffer_size: 333,
        ..BackendStreamConfig::default()
    };

    let playback = Playback::start(&backend, &config, controller.engine()).unwrap();
    assert_eq!(playback.sample_rate(), 44100);
    assert_eq!(playback.channels(), 2);

    let captured = backend.captured.lock().unwrap();
    assert_eq!(captured.len(), 5 * 333 * 2);

    let period = waveform::generate(100, 0.0, WaveformKind::Sine, false);
    for (i, frame) in captured.chunks_exact(2).enumerate() {
        assert_eq!(frame[0], frame[1]);
        assert!((frame[0] - period[i % 100]).abs() < 1e-6, "frame {}", i);
    }
}

#[test]
fn playback_rejects_sample_rate_mismatch() {
    let controller = SynthController::new(EngineConfig::with_sample_rate(48000.0), 4);
    let backend = MockBackend::new(1);
    let result = Playback::start(&backend, &BackendStreamConfig::default(), controller.engine());
    assert!(matches!(result, Err(Error::InvalidConfig(_))));
    assert!(backend.captured.lock().unwrap().is_empty());
}

#[test]
fn mock_backend_is_usable_as_trait_object() {
    let backend: Box<dyn AudioBackend> = Box::new(MockBackend::new(0));
    assert_eq!(backend.name(), "mock");
    let device = backend.default_output_device().unwrap().unwrap();
    assert!(device.is_default);
}
