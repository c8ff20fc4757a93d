use crate::error::CommandError;
use crate::mixer::Change;
use crate::transaction::ExecutableControl;
use byteorder::{ByteOrder, LittleEndian};
use log::debug;
use vsl_types::{Channel, ControlKind};

/// Lowest host gain accepted on set, -60.00 dB.
pub const VOLUME_MIN: i32 = -6000;
/// Highest host gain accepted on set, +12.00 dB.
pub const VOLUME_MAX: i32 = 1200;
pub const VOLUME_STEP: i32 = 1;

// Device gains are 1/256 dB per step, host gains are 1/100 dB per step. Both conversions
// truncate towards zero.

pub fn device_to_host(device: i16) -> i32 {
    (device as i32 * 100) / 256
}

pub fn clamp_host_gain(host: i32) -> i32 {
    host.clamp(VOLUME_MIN, VOLUME_MAX)
}

/// Converts a host gain to the device representation, clamping it to the accepted range first.
pub fn host_to_device(host: i32) -> i16 {
    // -15360..=3072 after clamping, always fits.
    ((clamp_host_gain(host) * 256) / 100) as i16
}

pub trait VolumeCommands: ExecutableControl {
    fn get_channel_gain(&self, unit: u8, channel: Channel) -> Result<i32, CommandError> {
        let result = self.read(unit, ControlKind::Volume.selector(), channel, 2)?;
        Ok(device_to_host(LittleEndian::read_i16(&result)))
    }

    fn set_channel_gain(&self, unit: u8, channel: Channel, gain: i32) -> Result<(), CommandError> {
        let mut out = [0; 2];
        LittleEndian::write_i16(&mut out, host_to_device(gain));
        self.write(unit, ControlKind::Volume.selector(), channel, &out)
    }

    /// Reads left then right. A failed left read returns immediately.
    fn get_stereo_gain(&self, unit: u8) -> Result<(i32, i32), CommandError> {
        let left = self.get_channel_gain(unit, Channel::Left)?;
        let right = self.get_channel_gain(unit, Channel::Right)?;
        Ok((left, right))
    }

    /// Writes left then right. If the right write fails the left one has already been applied,
    /// nothing is rolled back.
    fn set_stereo_gain(&self, unit: u8, left: i32, right: i32) -> Result<Change, CommandError> {
        debug!("Setting unit {} gain to ({}, {})", unit, left, right);
        self.set_channel_gain(unit, Channel::Left, left)?;
        self.set_channel_gain(unit, Channel::Right, right)?;
        Ok(Change::Changed)
    }
}

impl<E: ExecutableControl + ?Sized> VolumeCommands for E {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::simulated::SimulatedDevice;
    use crate::transaction::ControlRequests;
    use std::sync::Arc;

    #[test]
    fn device_to_host_truncates() {
        assert_eq!(device_to_host(0), 0);
        assert_eq!(device_to_host(256), 100);
        assert_eq!(device_to_host(-15360), -6000);
        assert_eq!(device_to_host(3072), 1200);
        // 0.99 dB steps towards zero
        assert_eq!(device_to_host(255), 99);
        assert_eq!(device_to_host(-255), -99);
        assert_eq!(device_to_host(i16::MAX), 12799);
        assert_eq!(device_to_host(i16::MIN), -12800);

        for device in i16::MIN..=i16::MAX {
            assert_eq!(device_to_host(device), (device as i32 * 100) / 256);
        }
    }

    #[test]
    fn host_to_device_truncates_inside_range() {
        assert_eq!(host_to_device(-6000), -15360);
        assert_eq!(host_to_device(1200), 3072);
        assert_eq!(host_to_device(1), 2);
        assert_eq!(host_to_device(-1), -2);

        for host in VOLUME_MIN..=VOLUME_MAX {
            assert_eq!(host_to_device(host) as i32, (host * 256) / 100);
        }
    }

    #[test]
    fn host_to_device_clamps_outside_range() {
        assert_eq!(host_to_device(-6001), host_to_device(-6000));
        assert_eq!(host_to_device(i32::MIN), host_to_device(-6000));
        assert_eq!(host_to_device(1201), host_to_device(1200));
        assert_eq!(host_to_device(i32::MAX), host_to_device(1200));
    }

    #[test]
    fn round_trip_drift_stays_below_one_host_step() {
        // Host -> device -> host loses at most one host unit.
        for host in VOLUME_MIN..=VOLUME_MAX {
            let back = device_to_host(host_to_device(host));
            assert!((back - host).abs() <= 1, "{} came back as {}", host, back);
        }

        // Device -> host -> device loses less than one host step (2.56 device units) plus the
        // truncation of the way back.
        for device in -15360i16..=3072 {
            let back = host_to_device(device_to_host(device));
            assert!(
                (back as i32 - device as i32).abs() <= 3,
                "{} came back as {}",
                device,
                back
            );
        }
    }

    #[test]
    fn boundary_gains_survive_an_echo() {
        let device = Arc::new(SimulatedDevice::new(0));
        let requests = ControlRequests::new(&device);

        assert_eq!(requests.set_stereo_gain(10, -6000, 1200), Ok(Change::Changed));

        let transactions = device.transactions();
        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[0].value, 0x0201);
        assert_eq!(transactions[0].data, (-15360i16).to_le_bytes().to_vec());
        assert_eq!(transactions[1].value, 0x0202);
        assert_eq!(transactions[1].data, 3072i16.to_le_bytes().to_vec());

        assert_eq!(requests.get_stereo_gain(10), Ok((-6000, 1200)));
    }

    #[test]
    fn set_clamps_each_channel() {
        let device = Arc::new(SimulatedDevice::new(0));
        let requests = ControlRequests::new(&device);

        requests.set_stereo_gain(11, -9000, 5000).unwrap();

        let transactions = device.transactions();
        assert_eq!(transactions[0].data, host_to_device(-6000).to_le_bytes().to_vec());
        assert_eq!(transactions[1].data, host_to_device(1200).to_le_bytes().to_vec());
        assert_eq!(requests.get_stereo_gain(11), Ok((-6000, 1200)));
    }

    #[test]
    fn failed_left_write_stops_before_right() {
        let device = Arc::new(SimulatedDevice::new(0));
        let requests = ControlRequests::new(&device);

        device.fail_next(rusb::Error::Io);
        let result = requests.set_stereo_gain(10, 0, 0);
        assert_eq!(result, Err(CommandError::UsbError(rusb::Error::Io)));
        assert_eq!(device.transactions().len(), 1);
    }

    #[test]
    fn failed_right_write_leaves_left_applied() {
        let device = Arc::new(SimulatedDevice::new(0));
        let requests = ControlRequests::new(&device);

        device.fail_transaction(1, rusb::Error::Busy);
        let result = requests.set_stereo_gain(10, -100, -200);
        assert_eq!(result, Err(CommandError::UsbError(rusb::Error::Busy)));

        assert_eq!(requests.get_channel_gain(10, Channel::Left), Ok(-100));
        assert_eq!(requests.get_channel_gain(10, Channel::Right), Ok(0));
    }

    #[test]
    fn short_reads_decode_the_bytes_that_arrived() {
        let device = Arc::new(SimulatedDevice::new(0));
        let requests = ControlRequests::new(&device);

        let selector = ControlKind::Volume.selector();
        for channel in [Channel::Left, Channel::Right] {
            requests.write(10, selector, channel, &[0xff, 0x7f]).unwrap();
        }
        assert_eq!(requests.get_stereo_gain(10), Ok((12799, 12799)));

        // Only the low byte of 0x7fff arrives, the high byte reads as zero.
        device.short_transaction(4, 1);
        device.short_transaction(5, 1);
        assert_eq!(requests.get_stereo_gain(10), Ok((99, 99)));
        assert_eq!(device.transactions().len(), 6);
    }

    #[test]
    fn failed_left_read_stops_before_right() {
        let device = Arc::new(SimulatedDevice::new(0));
        let requests = ControlRequests::new(&device);

        device.fail_next(rusb::Error::NoDevice);
        let result = requests.get_stereo_gain(10);
        assert_eq!(result, Err(CommandError::UsbError(rusb::Error::NoDevice)));
        assert_eq!(device.transactions().len(), 1);
    }
}
