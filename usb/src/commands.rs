use rusb::{Direction, Recipient, RequestType};
use vsl_types::{Channel, ControlSelector};

/// UAC2 `CUR` request code, shared by GET_CUR and SET_CUR.
pub const REQUEST_CUR: u8 = 0x01;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Request {
    GetCur,
    SetCur,
}

impl Request {
    pub fn code(&self) -> u8 {
        match self {
            Request::GetCur | Request::SetCur => REQUEST_CUR,
        }
    }

    pub fn direction(&self) -> Direction {
        match self {
            Request::GetCur => Direction::In,
            Request::SetCur => Direction::Out,
        }
    }

    /// bmRequestType for a class request to the audio control interface.
    pub fn request_type(&self) -> u8 {
        rusb::request_type(self.direction(), RequestType::Class, Recipient::Interface)
    }
}

/// wValue: control selector in the high byte, channel number in the low byte.
pub fn control_value(selector: ControlSelector, channel: Channel) -> u16 {
    ((selector.id() as u16) << 8) | channel.id() as u16
}

/// wIndex: entity (unit) id in the high byte, interface number in the low byte.
pub fn control_index(unit: u8, interface: u8) -> u16 {
    ((unit as u16) << 8) | interface as u16
}
