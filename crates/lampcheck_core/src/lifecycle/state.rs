/// Device lifecycle states.
///
/// `Starting` is entered at boot. None of the states is terminal: `Sleeping`
/// absorbs everything but a Start or Resume press, and the device otherwise
/// loops until power-off.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum DeviceState {
    Error,
    Continuing,
    Paused,
    Restarting,
    Sleeping,
    Starting,
    Finished,
    Stopped,
}

impl DeviceState {
    /// True only while the lights are cycling and sensors are being verified.
    pub const fn is_monitoring(self) -> bool {
        matches!(self, DeviceState::Continuing)
    }

    /// States whose handler forces every channel output low.
    pub const fn forces_lights_off(self) -> bool {
        matches!(self, DeviceState::Error | DeviceState::Stopped)
    }

    /// Stable, human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            DeviceState::Error => "Error",
            DeviceState::Continuing => "Continuing",
            DeviceState::Paused => "Paused",
            DeviceState::Restarting => "Restarting",
            DeviceState::Sleeping => "Sleeping",
            DeviceState::Starting => "Starting",
            DeviceState::Finished => "Finished",
            DeviceState::Stopped => "Stopped",
        }
    }
}

/// Canonical list of all device states.
pub const ALL_STATES: [DeviceState; 8] = [
    DeviceState::Error,
    DeviceState::Continuing,
    DeviceState::Paused,
    DeviceState::Restarting,
    DeviceState::Sleeping,
    DeviceState::Starting,
    DeviceState::Finished,
    DeviceState::Stopped,
];
