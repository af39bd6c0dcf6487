//! Output device discovery via cpal.

use crate::{Error, Result};
use cpal::Device;
use cpal::traits::{DeviceTrait, HostTrait};

/// Extract device name via `description()` (cpal 0.17+).
pub(crate) fn device_name(device: &Device) -> std::result::Result<String, cpal::DeviceNameError> {
    device.description().map(|d| d.name().to_string())
}

/// Audio output device information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioDevice {
    /// Human-readable device name.
    pub name: String,
    /// Default sample rate in Hz.
    pub default_sample_rate: u32,
    /// Default channel count.
    pub channels: u16,
    /// Whether this is the host's default output.
    pub is_default: bool,
}

fn describe(device: &Device, default_name: Option<&str>) -> Option<AudioDevice> {
    let name = device_name(device).ok()?;
    let (default_sample_rate, channels) = device
        .default_output_config()
        .map(|c| (c.sample_rate(), c.channels()))
        .unwrap_or((44100, 2));
    let is_default = default_name == Some(name.as_str());
    Some(AudioDevice {
        name,
        default_sample_rate,
        channels,
        is_default,
    })
}

/// List all output devices of the default host.
pub fn list_devices() -> Result<Vec<AudioDevice>> {
    let host = cpal::default_host();
    let default_name = host
        .default_output_device()
        .and_then(|d| device_name(&d).ok());

    let outputs = host
        .output_devices()
        .map_err(|e| Error::Stream(e.to_string()))?;

    Ok(outputs
        .filter_map(|device| describe(&device, default_name.as_deref()))
        .collect())
}

/// Get the default output device info, if the host has one.
pub fn default_output_device() -> Result<Option<AudioDevice>> {
    let host = cpal::default_host();
    Ok(host.default_output_device().and_then(|d| {
        let name = device_name(&d).ok();
        describe(&d, name.as_deref())
    }))
}

/// Find an output device by partial name match (case-insensitive).
///
/// Returns the first device whose name contains the search string.
pub fn find_output_device(search: &str) -> Result<AudioDevice> {
    let search_lower = search.to_lowercase();
    list_devices()?
        .into_iter()
        .find(|d| d.name.to_lowercase().contains(&search_lower))
        .ok_or_else(|| Error::DeviceNotFound(format!("no output device matching '{}'", search)))
}
