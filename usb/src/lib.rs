pub use rusb;
pub mod commands;
pub mod device;
pub mod error;
pub mod initialiser;
pub mod mixer;
pub mod mute;
pub mod registry;
pub mod transaction;
pub mod volume;

pub const VID_AUDIOBOX: u16 = 0x194f;
pub const PID_AUDIOBOX_22_VSL: u16 = 0x0101;
