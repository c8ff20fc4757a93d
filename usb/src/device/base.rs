// The transport boundary. Everything above this file speaks in units, selectors and channels,
// everything below it only sees raw control transfers on endpoint zero.

/// A synchronous control channel to the device.
///
/// Implementations perform exactly one bus transaction per call and report the number of bytes
/// transferred. They are expected to serialise concurrent transactions themselves, nothing above
/// this trait takes a lock.
pub trait ControlTransport {
    /// bInterfaceNumber of the audio control interface, used in every wIndex.
    fn interface_number(&self) -> u8;

    fn read_control(
        &self,
        request_type: u8,
        request: u8,
        value: u16,
        index: u16,
        buf: &mut [u8],
    ) -> Result<usize, rusb::Error>;

    fn write_control(
        &self,
        request_type: u8,
        request: u8,
        value: u16,
        index: u16,
        data: &[u8],
    ) -> Result<usize, rusb::Error>;
}

// We primarily need the bus number, and address for comparison..
#[derive(Debug, Clone)]
pub struct AudioBoxDevice {
    pub(crate) bus_number: u8,
    pub(crate) address: u8,
}

impl AudioBoxDevice {
    pub fn bus_number(&self) -> u8 {
        self.bus_number
    }
    pub fn address(&self) -> u8 {
        self.address
    }
}
