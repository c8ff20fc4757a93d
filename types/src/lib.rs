#[cfg(feature = "clap")]
use clap::ValueEnum;
use enum_map::Enum;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter};

/// Feature Unit control selectors, as numbered by the USB Audio Class 2.0 specification.
///
/// Only `Mute` and `Volume` are driven by this utility, the remainder are listed so the
/// table stays complete.
#[derive(Copy, Clone, Debug, Display, EnumIter, EnumCount, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ControlSelector {
    Undefined = 0x00,
    Mute = 0x01,
    Volume = 0x02,
    Bass = 0x03,
    Mid = 0x04,
    Treble = 0x05,
    GraphicEqualizer = 0x06,
    AutomaticGain = 0x07,
    Delay = 0x08,
    BassBoost = 0x09,
    Loudness = 0x0a,
    InputGain = 0x0b,
    InputGainPad = 0x0c,
    PhaseInverter = 0x0d,
    Underflow = 0x0e,
    Overflow = 0x0f,
    Latency = 0x10,
}

impl ControlSelector {
    pub fn id(&self) -> u8 {
        *self as u8
    }
}

/// Logical channel number inside a Feature Unit.
#[derive(Copy, Clone, Debug, Display, EnumIter, EnumCount, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Channel {
    Master = 0,
    Left = 1,
    Right = 2,
}

impl Channel {
    pub fn id(&self) -> u8 {
        *self as u8
    }
}

#[derive(Copy, Clone, Debug, Display, Enum, EnumIter, EnumCount, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(ValueEnum))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AudioPath {
    Playback,
    Capture,
}

impl AudioPath {
    /// The Feature Unit the AudioBox 22 VSL exposes for this path.
    pub fn default_unit(&self) -> u8 {
        match self {
            AudioPath::Playback => 10,
            AudioPath::Capture => 11,
        }
    }
}

#[derive(Copy, Clone, Debug, Display, EnumIter, EnumCount, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ControlKind {
    Volume,
    Mute,
}

impl ControlKind {
    pub fn selector(&self) -> ControlSelector {
        match self {
            ControlKind::Volume => ControlSelector::Volume,
            ControlKind::Mute => ControlSelector::Mute,
        }
    }

    /// Number of values a host sees for this control.
    pub fn channel_count(&self) -> usize {
        match self {
            ControlKind::Volume => 2,
            ControlKind::Mute => 1,
        }
    }
}

/// The fixed set of controls exposed to the host mixer, in registration order.
#[derive(Copy, Clone, Debug, Display, Enum, EnumIter, EnumCount, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(ValueEnum))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LogicalControl {
    PlaybackVolume,
    PlaybackSwitch,
    CaptureVolume,
    CaptureSwitch,
}

impl LogicalControl {
    pub fn kind(&self) -> ControlKind {
        match self {
            LogicalControl::PlaybackVolume | LogicalControl::CaptureVolume => ControlKind::Volume,
            LogicalControl::PlaybackSwitch | LogicalControl::CaptureSwitch => ControlKind::Mute,
        }
    }

    pub fn path(&self) -> AudioPath {
        match self {
            LogicalControl::PlaybackVolume | LogicalControl::PlaybackSwitch => AudioPath::Playback,
            LogicalControl::CaptureVolume | LogicalControl::CaptureSwitch => AudioPath::Capture,
        }
    }

    // Mixer applications key off the "Volume" and "Switch" suffixes.
    pub fn name(&self) -> &'static str {
        match self {
            LogicalControl::PlaybackVolume => "AudioBox VSL Playback Volume",
            LogicalControl::PlaybackSwitch => "AudioBox VSL Playback Switch",
            LogicalControl::CaptureVolume => "AudioBox VSL Capture Volume",
            LogicalControl::CaptureSwitch => "AudioBox VSL Capture Switch",
        }
    }
}
