use crate::device::base::ControlTransport;
use crate::error::{CommandError, RegisterError, RegistryError};
use crate::mute::MuteCommands;
use crate::transaction::ControlRequests;
use crate::volume::{VolumeCommands, VOLUME_MAX, VOLUME_MIN, VOLUME_STEP};
use log::{error, info};
use std::ops::Deref;
use vsl_types::ControlKind;

/// Outcome of a successful put.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Change {
    Unchanged,
    Changed,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ElemType {
    Integer,
    Boolean,
}

/// What the host mixer is told about a control.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ElemInfo {
    pub elem_type: ElemType,
    pub count: usize,
    pub min: i32,
    pub max: i32,
    pub step: i32,
}

/// The values of one control as the host sees them, one entry per channel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElemValue(Vec<i32>);

impl ElemValue {
    pub fn into_inner(self) -> Vec<i32> {
        self.0
    }
}

impl From<Vec<i32>> for ElemValue {
    fn from(values: Vec<i32>) -> Self {
        Self(values)
    }
}

impl<const N: usize> From<[i32; N]> for ElemValue {
    fn from(values: [i32; N]) -> Self {
        Self(values.to_vec())
    }
}

impl Deref for ElemValue {
    type Target = [i32];

    fn deref(&self) -> &[i32] {
        &self.0
    }
}

/// A host visible control bound to one Feature Unit.
///
/// The kind decides everything else: the info descriptor, which selector and channels are
/// addressed, and how values are converted.
pub struct MixerControl<T: ControlTransport> {
    kind: ControlKind,
    unit: u8,
    requests: ControlRequests<T>,
}

impl<T: ControlTransport> MixerControl<T> {
    pub fn new(kind: ControlKind, unit: u8, requests: ControlRequests<T>) -> Self {
        Self {
            kind,
            unit,
            requests,
        }
    }

    pub fn kind(&self) -> ControlKind {
        self.kind
    }

    pub fn unit(&self) -> u8 {
        self.unit
    }

    pub fn info(&self) -> ElemInfo {
        match self.kind {
            ControlKind::Volume => ElemInfo {
                elem_type: ElemType::Integer,
                count: self.kind.channel_count(),
                min: VOLUME_MIN,
                max: VOLUME_MAX,
                step: VOLUME_STEP,
            },
            ControlKind::Mute => ElemInfo {
                elem_type: ElemType::Boolean,
                count: self.kind.channel_count(),
                min: 0,
                max: 1,
                step: 1,
            },
        }
    }

    pub fn get(&self) -> Result<ElemValue, CommandError> {
        match self.kind {
            ControlKind::Volume => {
                let (left, right) = self.requests.get_stereo_gain(self.unit)?;
                Ok(ElemValue::from([left, right]))
            }
            ControlKind::Mute => {
                let audible = self.requests.get_mute(self.unit)?;
                Ok(ElemValue::from([i32::from(audible)]))
            }
        }
    }

    pub fn put(&self, values: &ElemValue) -> Result<Change, CommandError> {
        if values.len() != self.kind.channel_count() {
            return Err(CommandError::InvalidArgument(
                "value count does not match the control",
            ));
        }

        match self.kind {
            ControlKind::Volume => self.requests.set_stereo_gain(self.unit, values[0], values[1]),
            ControlKind::Mute => self.requests.set_mute(self.unit, values[0] != 0),
        }
    }
}

/// The host side registry that owns controls once they are added.
pub trait ControlRegistry<T: ControlTransport> {
    fn add_control(&mut self, name: String, control: MixerControl<T>) -> Result<(), RegistryError>;
}

pub fn register_control<T, R>(
    registry: &mut R,
    requests: &ControlRequests<T>,
    name: &str,
    kind: ControlKind,
    unit: u8,
) -> Result<(), RegisterError>
where
    T: ControlTransport,
    R: ControlRegistry<T> + ?Sized,
{
    let mut control_name = String::new();
    if control_name.try_reserve_exact(name.len()).is_err() {
        error!("Failed to allocate control '{}'", name);
        return Err(RegisterError::OutOfMemory);
    }
    control_name.push_str(name);

    // On rejection the registry drops the binding, and with it our handle on the device.
    let control = MixerControl::new(kind, unit, requests.clone());
    if let Err(e) = registry.add_control(control_name, control) {
        error!("Failed to add control '{}': {}", name, e);
        return Err(e.into());
    }

    info!("Registered control '{}' (unit={})", name, unit);
    Ok(())
}
