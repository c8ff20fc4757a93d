use crate::device::base::ControlTransport;
use crate::error::InitError;
use crate::mixer::{register_control, ControlRegistry};
use crate::transaction::ControlRequests;
use enum_map::EnumMap;
use log::{error, info};
use strum::{EnumCount, IntoEnumIterator};
use vsl_types::{AudioPath, LogicalControl};

/// The Feature Unit ids each audio path is bound to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FeatureUnits(EnumMap<AudioPath, u8>);

impl FeatureUnits {
    pub fn new(playback: u8, capture: u8) -> Self {
        let mut units = EnumMap::default();
        units[AudioPath::Playback] = playback;
        units[AudioPath::Capture] = capture;
        Self(units)
    }

    pub fn unit(&self, path: AudioPath) -> u8 {
        self.0[path]
    }
}

impl Default for FeatureUnits {
    fn default() -> Self {
        Self::new(
            AudioPath::Playback.default_unit(),
            AudioPath::Capture.default_unit(),
        )
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InitState {
    NotStarted,
    /// Registering the k-th control, counting from 1.
    Registering(usize),
    Complete,
    Failed(LogicalControl),
}

/// Registers the four AudioBox controls, in order, stopping at the first failure.
///
/// Controls registered before a failure stay with the registry, which is expected to drop
/// them when the device detaches.
pub struct Initialiser<T: ControlTransport> {
    requests: ControlRequests<T>,
    units: FeatureUnits,
    state: InitState,
}

impl<T: ControlTransport> Initialiser<T> {
    pub fn new(requests: ControlRequests<T>, units: FeatureUnits) -> Self {
        Self {
            requests,
            units,
            state: InitState::NotStarted,
        }
    }

    pub fn state(&self) -> InitState {
        self.state
    }

    pub fn run<R>(&mut self, registry: &mut R) -> Result<(), InitError>
    where
        R: ControlRegistry<T> + ?Sized,
    {
        if self.state != InitState::NotStarted {
            return Err(InitError::InvalidArgument("initialisation has already run"));
        }
        if !self.requests.is_attached() {
            error!("Invalid mixer interface, device handle is not available");
            return Err(InitError::InvalidArgument("device handle is not available"));
        }

        info!("Initialising AudioBox 22 VSL controls");
        for (step, control) in LogicalControl::iter().enumerate() {
            self.state = InitState::Registering(step + 1);

            let unit = self.units.unit(control.path());
            let result = register_control(
                registry,
                &self.requests,
                control.name(),
                control.kind(),
                unit,
            );

            if let Err(source) = result {
                self.state = InitState::Failed(control);
                error!("Initialisation failed at {}: {}", control.name(), source);
                return Err(InitError::Registration { control, source });
            }
        }

        self.state = InitState::Complete;
        info!("Successfully registered {} controls", LogicalControl::COUNT);
        Ok(())
    }
}

/// Convenience wrapper around [`Initialiser`] for a single attach.
pub fn init_controls<T, R>(
    registry: &mut R,
    requests: ControlRequests<T>,
    units: FeatureUnits,
) -> Result<(), InitError>
where
    T: ControlTransport,
    R: ControlRegistry<T> + ?Sized,
{
    Initialiser::new(requests, units).run(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::simulated::SimulatedDevice;
    use crate::error::{RegisterError, RegistryError};
    use crate::mixer::ElemValue;
    use crate::registry::Mixer;
    use std::sync::Arc;

    #[test]
    fn registers_all_four_in_order() {
        let device = Arc::new(SimulatedDevice::new(0));
        let mut mixer: Mixer<SimulatedDevice> = Mixer::new();
        let mut initialiser =
            Initialiser::new(ControlRequests::new(&device), FeatureUnits::default());
        assert_eq!(initialiser.state(), InitState::NotStarted);

        initialiser.run(&mut mixer).unwrap();
        assert_eq!(initialiser.state(), InitState::Complete);
        assert_eq!(
            mixer.names(),
            vec![
                "AudioBox VSL Playback Volume",
                "AudioBox VSL Playback Switch",
                "AudioBox VSL Capture Volume",
                "AudioBox VSL Capture Switch",
            ]
        );
        assert_eq!(mixer.control("AudioBox VSL Playback Switch").map(|c| c.unit()), Some(10));
        assert_eq!(mixer.control("AudioBox VSL Capture Volume").map(|c| c.unit()), Some(11));

        // Registration alone never talks to the device.
        assert!(device.transactions().is_empty());
    }

    #[test]
    fn custom_units_are_honoured() {
        let device = Arc::new(SimulatedDevice::new(0));
        let mut mixer: Mixer<SimulatedDevice> = Mixer::new();
        init_controls(&mut mixer, ControlRequests::new(&device), FeatureUnits::new(5, 6)).unwrap();

        mixer.write("AudioBox VSL Capture Switch", &ElemValue::from([0])).unwrap();
        let transactions = device.transactions();
        assert_eq!(transactions[0].index, 0x0600);
    }

    #[test]
    fn stops_at_the_first_rejection() {
        let device = Arc::new(SimulatedDevice::new(0));
        let mut mixer: Mixer<SimulatedDevice> = Mixer::with_capacity_limit(2);
        let mut initialiser =
            Initialiser::new(ControlRequests::new(&device), FeatureUnits::default());

        let error = initialiser.run(&mut mixer).unwrap_err();
        assert_eq!(
            error,
            InitError::Registration {
                control: LogicalControl::CaptureVolume,
                source: RegisterError::Rejected(RegistryError::CapacityReached(2)),
            }
        );
        assert_eq!(error.control(), Some(LogicalControl::CaptureVolume));
        assert_eq!(initialiser.state(), InitState::Failed(LogicalControl::CaptureVolume));
        assert_eq!(mixer.len(), 2);
    }

    #[test]
    fn refuses_without_a_device() {
        let device = Arc::new(SimulatedDevice::new(0));
        let requests = ControlRequests::new(&device);
        drop(device);

        let mut mixer: Mixer<SimulatedDevice> = Mixer::new();
        let mut initialiser = Initialiser::new(requests, FeatureUnits::default());
        assert!(matches!(
            initialiser.run(&mut mixer),
            Err(InitError::InvalidArgument(_))
        ));
        assert_eq!(initialiser.state(), InitState::NotStarted);
        assert!(mixer.is_empty());
    }

    #[test]
    fn runs_only_once() {
        let device = Arc::new(SimulatedDevice::new(0));
        let mut mixer: Mixer<SimulatedDevice> = Mixer::new();
        let mut initialiser =
            Initialiser::new(ControlRequests::new(&device), FeatureUnits::default());

        initialiser.run(&mut mixer).unwrap();
        assert!(matches!(
            initialiser.run(&mut mixer),
            Err(InitError::InvalidArgument(_))
        ));
        assert_eq!(mixer.len(), 4);
    }
}
