use vsl_types::LogicalControl;

#[derive(thiserror::Error, Debug)]
pub enum ConnectError {
    #[error("No AudioBox device was found")]
    DeviceNotFound,

    #[error("USB error: {0}")]
    UsbError(#[from] rusb::Error),

    #[error("Unable to Claim Interface {0}")]
    DeviceNotClaimed(u8),
}

/// Failure of a single GET_CUR / SET_CUR transaction.
#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("USB error: {0}")]
    UsbError(#[from] rusb::Error),
}

/// Errors a host control registry may raise while adding a control.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Control '{0}' is already registered")]
    AlreadyExists(String),

    #[error("Control capacity of {0} reached")]
    CapacityReached(usize),

    #[error("Registry is out of memory")]
    OutOfMemory,

    #[error("Registry rejected the control: {0}")]
    Rejected(String),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RegisterError {
    #[error("Unable to allocate control binding")]
    OutOfMemory,

    #[error(transparent)]
    Rejected(#[from] RegistryError),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InitError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("Failed to register {control}: {source}")]
    Registration {
        control: LogicalControl,
        #[source]
        source: RegisterError,
    },
}

impl InitError {
    /// The control whose registration aborted the sequence, if any.
    pub fn control(&self) -> Option<LogicalControl> {
        match self {
            InitError::InvalidArgument(_) => None,
            InitError::Registration { control, .. } => Some(*control),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MixerError {
    #[error("No control named '{0}'")]
    UnknownControl(String),

    #[error(transparent)]
    Command(#[from] CommandError),
}
