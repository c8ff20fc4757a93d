use crate::device::base::AudioBoxDevice;

pub mod base;
pub mod simulated;

// Linux and MacOS talk to the control interface through libusb.
mod libusb;
pub use crate::device::libusb::device::{AttachOptions, AudioBoxUSB};

pub fn find_devices(vendor_id: u16, product_id: u16) -> Vec<AudioBoxDevice> {
    libusb::device::find_devices(vendor_id, product_id)
}
