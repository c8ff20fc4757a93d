use crate::error::CommandError;
use crate::mixer::Change;
use crate::transaction::ExecutableControl;
use vsl_types::{Channel, ControlKind};

/// Mute state as the device encodes it. The host side uses the opposite polarity, a set
/// switch means sound is audible.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MuteState {
    Muted,
    Unmuted,
}

impl MuteState {
    pub fn id(&self) -> u8 {
        match self {
            MuteState::Muted => 0x01,
            MuteState::Unmuted => 0x00,
        }
    }

    pub fn from_id(id: u8) -> Self {
        match id {
            0x00 => MuteState::Unmuted,
            _ => MuteState::Muted,
        }
    }

    pub fn from_switch(audible: bool) -> Self {
        match audible {
            true => MuteState::Unmuted,
            false => MuteState::Muted,
        }
    }

    pub fn is_audible(&self) -> bool {
        *self == MuteState::Unmuted
    }
}

pub trait MuteCommands: ExecutableControl {
    /// Returns the host switch, `true` when the path is audible.
    fn get_mute(&self, unit: u8) -> Result<bool, CommandError> {
        let result = self.read(unit, ControlKind::Mute.selector(), Channel::Master, 1)?;
        Ok(MuteState::from_id(result[0]).is_audible())
    }

    fn set_mute(&self, unit: u8, audible: bool) -> Result<Change, CommandError> {
        let state = MuteState::from_switch(audible);
        self.write(unit, ControlKind::Mute.selector(), Channel::Master, &[state.id()])?;
        Ok(Change::Changed)
    }
}

impl<E: ExecutableControl + ?Sized> MuteCommands for E {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::simulated::SimulatedDevice;
    use crate::transaction::ControlRequests;
    use std::sync::Arc;

    #[test]
    fn polarity_is_inverted() {
        assert_eq!(MuteState::from_switch(true).id(), 0x00);
        assert_eq!(MuteState::from_switch(false).id(), 0x01);
        assert!(MuteState::from_id(0x00).is_audible());
        assert!(!MuteState::from_id(0x01).is_audible());
        // Anything non-zero from the device counts as muted.
        assert!(!MuteState::from_id(0xff).is_audible());
    }

    #[test]
    fn switch_round_trips_through_the_device() {
        let device = Arc::new(SimulatedDevice::new(0));
        let requests = ControlRequests::new(&device);

        // Fresh device reads back unmuted.
        assert_eq!(requests.get_mute(10), Ok(true));

        assert_eq!(requests.set_mute(10, false), Ok(Change::Changed));
        assert_eq!(requests.get_mute(10), Ok(false));
        assert_eq!(requests.set_mute(10, true), Ok(Change::Changed));
        assert_eq!(requests.get_mute(10), Ok(true));

        let transactions = device.transactions();
        assert_eq!(transactions[1].data, vec![0x01]);
        assert_eq!(transactions[3].data, vec![0x00]);
        assert!(transactions.iter().all(|t| t.value == 0x0100 && t.index == 0x0a00));
    }

    #[test]
    fn set_reports_change_even_without_one() {
        let device = Arc::new(SimulatedDevice::new(0));
        let requests = ControlRequests::new(&device);

        assert_eq!(requests.set_mute(11, true), Ok(Change::Changed));
        assert_eq!(requests.set_mute(11, true), Ok(Change::Changed));
        assert_eq!(device.transactions().len(), 2);
    }

    #[test]
    fn errors_are_returned_as_is() {
        let device = Arc::new(SimulatedDevice::new(0));
        let requests = ControlRequests::new(&device);

        device.fail_next(rusb::Error::Pipe);
        assert_eq!(
            requests.set_mute(11, false),
            Err(CommandError::UsbError(rusb::Error::Pipe))
        );
        assert_eq!(requests.get_mute(11), Ok(true));
    }
}
