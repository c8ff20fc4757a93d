use crate::commands::{control_index, control_value, Request};
use crate::device::base::ControlTransport;
use crate::error::CommandError;
use log::{debug, warn};
use std::sync::{Arc, Weak};
use vsl_types::{Channel, ControlSelector};

/// Largest payload a Feature Unit CUR request carries here.
pub const MAX_TRANSFER_SIZE: usize = 4;

/// Issues single GET_CUR / SET_CUR transactions against a Feature Unit.
///
/// The codecs in [`crate::volume`] and [`crate::mute`] are built on top of these two calls.
pub trait ExecutableControl {
    fn read(
        &self,
        unit: u8,
        selector: ControlSelector,
        channel: Channel,
        size: usize,
    ) -> Result<Vec<u8>, CommandError>;

    fn write(
        &self,
        unit: u8,
        selector: ControlSelector,
        channel: Channel,
        data: &[u8],
    ) -> Result<(), CommandError>;
}

/// Builds control requests for one device.
///
/// Only a weak reference to the device is held; once the owner drops the device every
/// request fails with [`CommandError::InvalidArgument`] before touching the bus.
pub struct ControlRequests<T: ControlTransport> {
    device: Weak<T>,
}

impl<T: ControlTransport> Clone for ControlRequests<T> {
    fn clone(&self) -> Self {
        Self {
            device: self.device.clone(),
        }
    }
}

impl<T: ControlTransport> ControlRequests<T> {
    pub fn new(device: &Arc<T>) -> Self {
        Self {
            device: Arc::downgrade(device),
        }
    }

    pub fn is_attached(&self) -> bool {
        self.device.strong_count() > 0
    }

    fn device(&self) -> Result<Arc<T>, CommandError> {
        self.device.upgrade().ok_or_else(|| {
            warn!("Control request issued without a device handle");
            CommandError::InvalidArgument("device handle is not available")
        })
    }
}

fn check_size(size: usize) -> Result<(), CommandError> {
    if size == 0 || size > MAX_TRANSFER_SIZE {
        warn!("Invalid buffer size {}", size);
        return Err(CommandError::InvalidArgument(
            "transfer size must be between 1 and 4 bytes",
        ));
    }
    Ok(())
}

impl<T: ControlTransport> ExecutableControl for ControlRequests<T> {
    fn read(
        &self,
        unit: u8,
        selector: ControlSelector,
        channel: Channel,
        size: usize,
    ) -> Result<Vec<u8>, CommandError> {
        let device = self.device()?;
        check_size(size)?;

        let request = Request::GetCur;
        let value = control_value(selector, channel);
        let index = control_index(unit, device.interface_number());

        let mut buf = vec![0; size];
        match device.read_control(request.request_type(), request.code(), value, index, &mut buf)
        {
            Ok(length) => {
                if length < size {
                    // Whatever didn't arrive stays zeroed.
                    warn!(
                        "Short GET_CUR response (unit={}, ctrl=0x{:02x}, ch={}): {} of {} bytes",
                        unit,
                        selector.id(),
                        channel.id(),
                        length,
                        size
                    );
                }
                Ok(buf)
            }
            Err(error) => {
                debug!(
                    "GET_CUR failed (unit={}, ctrl=0x{:02x}, ch={}, ret={})",
                    unit,
                    selector.id(),
                    channel.id(),
                    error
                );
                Err(error.into())
            }
        }
    }

    fn write(
        &self,
        unit: u8,
        selector: ControlSelector,
        channel: Channel,
        data: &[u8],
    ) -> Result<(), CommandError> {
        let device = self.device()?;
        check_size(data.len())?;

        let request = Request::SetCur;
        let value = control_value(selector, channel);
        let index = control_index(unit, device.interface_number());

        if let Err(error) =
            device.write_control(request.request_type(), request.code(), value, index, data)
        {
            debug!(
                "SET_CUR failed (unit={}, ctrl=0x{:02x}, ch={}, ret={})",
                unit,
                selector.id(),
                channel.id(),
                error
            );
            return Err(error.into());
        }
        Ok(())
    }
}
