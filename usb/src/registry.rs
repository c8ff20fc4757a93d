use crate::device::base::ControlTransport;
use crate::error::{MixerError, RegistryError};
use crate::mixer::{Change, ControlRegistry, ElemInfo, ElemValue, MixerControl};
use log::debug;

/// Upper bound on controls a [`Mixer`] accepts, mirrors the user control limit of snd.ko.
pub const MAX_CONTROLS: usize = 32;

/// A minimal in-process host registry.
///
/// Controls are kept in registration order and looked up by name. Dropping the mixer (or
/// calling [`Mixer::clear`]) is the teardown that happens when the device goes away.
pub struct Mixer<T: ControlTransport> {
    controls: Vec<(String, MixerControl<T>)>,
    capacity: usize,
}

impl<T: ControlTransport> Default for Mixer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ControlTransport> Mixer<T> {
    pub fn new() -> Self {
        Self::with_capacity_limit(MAX_CONTROLS)
    }

    pub fn with_capacity_limit(capacity: usize) -> Self {
        Self {
            controls: Vec::new(),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.controls.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn control(&self, name: &str) -> Option<&MixerControl<T>> {
        self.controls
            .iter()
            .find(|(control_name, _)| control_name == name)
            .map(|(_, control)| control)
    }

    fn lookup(&self, name: &str) -> Result<&MixerControl<T>, MixerError> {
        self.control(name)
            .ok_or_else(|| MixerError::UnknownControl(name.to_string()))
    }

    pub fn info(&self, name: &str) -> Result<ElemInfo, MixerError> {
        Ok(self.lookup(name)?.info())
    }

    pub fn read(&self, name: &str) -> Result<ElemValue, MixerError> {
        Ok(self.lookup(name)?.get()?)
    }

    pub fn write(&self, name: &str, values: &ElemValue) -> Result<Change, MixerError> {
        Ok(self.lookup(name)?.put(values)?)
    }

    pub fn clear(&mut self) {
        debug!("Removing {} controls", self.controls.len());
        self.controls.clear();
    }
}

impl<T: ControlTransport> ControlRegistry<T> for Mixer<T> {
    fn add_control(&mut self, name: String, control: MixerControl<T>) -> Result<(), RegistryError> {
        if self.control(&name).is_some() {
            return Err(RegistryError::AlreadyExists(name));
        }
        if self.controls.len() >= self.capacity {
            return Err(RegistryError::CapacityReached(self.capacity));
        }
        self.controls
            .try_reserve(1)
            .map_err(|_| RegistryError::OutOfMemory)?;

        self.controls.push((name, control));
        Ok(())
    }
}
