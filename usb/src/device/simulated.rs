use crate::device::base::ControlTransport;
use log::debug;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// One control transfer as seen on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub request_type: u8,
    pub request: u8,
    pub value: u16,
    pub index: u16,
    pub data: Vec<u8>,
}

#[derive(Default)]
struct SimulatedState {
    // Keyed by (wValue, wIndex), holds whatever was last written there.
    values: HashMap<(u16, u16), Vec<u8>>,
    transactions: Vec<Transaction>,
    failures: HashMap<usize, rusb::Error>,
    // Transaction position to the number of bytes the device answers with.
    short_reads: HashMap<usize, usize>,
}

/// An in-memory device that echoes back the last value written to each control address.
///
/// Addresses that were never written read back as zeroes (0 dB, unmuted). Every transfer that
/// reaches the device is logged, including the ones told to fail or to answer short.
pub struct SimulatedDevice {
    interface: u8,
    state: Mutex<SimulatedState>,
}

impl SimulatedDevice {
    pub fn new(interface: u8) -> Self {
        Self {
            interface,
            state: Mutex::new(SimulatedState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, SimulatedState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Make the n-th transaction (counting from zero, over the device's lifetime) fail.
    pub fn fail_transaction(&self, n: usize, error: rusb::Error) {
        self.state().failures.insert(n, error);
    }

    /// Make the next transaction fail.
    pub fn fail_next(&self, error: rusb::Error) {
        let mut state = self.state();
        let next = state.transactions.len();
        state.failures.insert(next, error);
    }

    /// Make the n-th transaction, if it is a read, answer with only `length` bytes.
    pub fn short_transaction(&self, n: usize, length: usize) {
        self.state().short_reads.insert(n, length);
    }

    /// Make the next read answer with only `length` bytes.
    pub fn short_next(&self, length: usize) {
        let mut state = self.state();
        let next = state.transactions.len();
        state.short_reads.insert(next, length);
    }

    pub fn transactions(&self) -> Vec<Transaction> {
        self.state().transactions.clone()
    }

    pub fn value(&self, value: u16, index: u16) -> Option<Vec<u8>> {
        self.state().values.get(&(value, index)).cloned()
    }

    fn record(
        &self,
        transaction: Transaction,
    ) -> Result<MutexGuard<'_, SimulatedState>, rusb::Error> {
        let mut state = self.state();
        let position = state.transactions.len();
        debug!("Simulated transfer #{}: {:x?}", position, transaction);
        state.transactions.push(transaction);

        match state.failures.remove(&position) {
            Some(error) => Err(error),
            None => Ok(state),
        }
    }
}

impl ControlTransport for SimulatedDevice {
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
        let mut state = self.record(Transaction {
            request_type,
            request,
            value,
            index,
            data: vec![],
        })?;

        let position = state.transactions.len() - 1;
        let length = match state.short_reads.remove(&position) {
            Some(length) => length.min(buf.len()),
            None => buf.len(),
        };

        // Bytes past the answered length are left as the caller handed them in.
        let answer = &mut buf[..length];
        answer.fill(0);
        if let Some(stored) = state.values.get(&(value, index)) {
            let copied = stored.len().min(length);
            answer[..copied].copy_from_slice(&stored[..copied]);
        }
        Ok(length)
    }

    fn write_control(
        &self,
        request_type: u8,
        request: u8,
        value: u16,
        index: u16,
        data: &[u8],
    ) -> Result<usize, rusb::Error> {
        let mut state = self.record(Transaction {
            request_type,
            request,
            value,
            index,
            data: data.to_vec(),
        })?;

        state.values.insert((value, index), data.to_vec());
        Ok(data.len())
    }
}
