use crate::device::base::{AudioBoxDevice, ControlTransport};
use crate::error::ConnectError;
use log::{debug, info, warn};
use rusb::{Device, DeviceHandle, GlobalContext};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AttachOptions {
    pub interface: u8,
    pub timeout: Duration,
    pub detach_kernel_driver: bool,
}

impl Default for AttachOptions {
    fn default() -> Self {
        Self {
            interface: 0,
            timeout: Duration::from_secs(1),
            detach_kernel_driver: true,
        }
    }
}

pub struct AudioBoxUSB {
    handle: DeviceHandle<GlobalContext>,
    interface: u8,
    device_is_claimed: bool,
    timeout: Duration,
}

impl AudioBoxUSB {
    fn find_device(device: &AudioBoxDevice) -> Result<Device<GlobalContext>, ConnectError> {
        for usb_device in rusb::devices()?.iter() {
            if usb_device.bus_number() == device.bus_number
                && usb_device.address() == device.address
            {
                return Ok(usb_device);
            }
        }
        Err(ConnectError::DeviceNotFound)
    }

    pub fn from_device(
        device: AudioBoxDevice,
        options: &AttachOptions,
    ) -> Result<Self, ConnectError> {
        // Firstly, we need to locate the USB device based on the location..
        let device = AudioBoxUSB::find_device(&device)?;
        let handle = device.open()?;

        info!("Connected to possible AudioBox device at {:?}", device);

        if options.detach_kernel_driver {
            // Not available on every platform, claiming below decides whether we can continue.
            if let Err(error) = handle.set_auto_detach_kernel_driver(true) {
                debug!("Kernel driver auto-detach unavailable: {}", error);
            }
        }

        let device_is_claimed = match handle.claim_interface(options.interface) {
            Ok(()) => true,
            Err(error) if options.detach_kernel_driver => {
                warn!("Unable to claim interface {}: {}", options.interface, error);
                return Err(ConnectError::DeviceNotClaimed(options.interface));
            }
            Err(error) => {
                warn!(
                    "Interface {} not claimed ({}), control requests may be refused",
                    options.interface, error
                );
                false
            }
        };

        Ok(Self {
            handle,
            interface: options.interface,
            device_is_claimed,
            timeout: options.timeout,
        })
    }
}

impl ControlTransport for AudioBoxUSB {
    fn interface_number(&self) -> u8 {
        self.interface
    }

    fn read_control(
        &self,
        request_type: u8,
        request: u8,
        value: u16,
        index: u16,
        buf: &mut [u8],
    ) -> Result<usize, rusb::Error> {
        self.handle
            .read_control(request_type, request, value, index, buf, self.timeout)
    }

    fn write_control(
        &self,
        request_type: u8,
        request: u8,
        value: u16,
        index: u16,
        data: &[u8],
    ) -> Result<usize, rusb::Error> {
        self.handle
            .write_control(request_type, request, value, index, data, self.timeout)
    }
}

impl Drop for AudioBoxUSB {
    fn drop(&mut self) {
        if self.device_is_claimed {
            // The kernel driver is reattached by libusb once the interface is released.
            if let Err(error) = self.handle.release_interface(self.interface) {
                debug!("Unable to release interface {}: {}", self.interface, error);
            }
        }
    }
}

pub fn find_devices(vendor_id: u16, product_id: u16) -> Vec<AudioBoxDevice> {
    let mut found_devices: Vec<AudioBoxDevice> = Vec::new();

    if let Ok(devices) = rusb::devices() {
        for device in devices.iter() {
            if let Ok(descriptor) = device.device_descriptor() {
                if descriptor.vendor_id() == vendor_id && descriptor.product_id() == product_id {
                    found_devices.push(AudioBoxDevice {
                        bus_number: device.bus_number(),
                        address: device.address(),
                    });
                }
            }
        }
    }

    found_devices
}
