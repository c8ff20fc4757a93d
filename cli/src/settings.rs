use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;
use vsl_types::AudioPath;
use vsl_usb::device::AttachOptions;
use vsl_usb::initialiser::FeatureUnits;
use vsl_usb::{PID_AUDIOBOX_22_VSL, VID_AUDIOBOX};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub vendor_id: u16,
    pub product_id: u16,
    pub interface: u8,
    pub playback_unit: u8,
    pub capture_unit: u8,
    pub timeout_ms: u64,
    pub detach_kernel_driver: bool,
}

impl Default for Settings {
    fn default() -> Self {
        let units = FeatureUnits::default();
        let options = AttachOptions::default();
        Self {
            vendor_id: VID_AUDIOBOX,
            product_id: PID_AUDIOBOX_22_VSL,
            interface: options.interface,
            playback_unit: units.unit(AudioPath::Playback),
            capture_unit: units.unit(AudioPath::Capture),
            timeout_ms: options.timeout.as_millis() as u64,
            detach_kernel_driver: options.detach_kernel_driver,
        }
    }
}

impl Settings {
    pub fn read(path: &Path) -> Result<Settings> {
        match File::open(path) {
            Ok(reader) => serde_json::from_reader(reader).context(format!(
                "Could not parse settings file at {}",
                path.to_string_lossy()
            )),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(Settings::default()),
            Err(error) => Err(error).context(format!(
                "Could not open settings file for reading at {}",
                path.to_string_lossy()
            )),
        }
    }

    pub fn units(&self) -> FeatureUnits {
        FeatureUnits::new(self.playback_unit, self.capture_unit)
    }

    pub fn attach_options(&self) -> AttachOptions {
        AttachOptions {
            interface: self.interface,
            timeout: Duration::from_millis(self.timeout_ms),
            detach_kernel_driver: self.detach_kernel_driver,
        }
    }
}
