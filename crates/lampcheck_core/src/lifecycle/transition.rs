use super::DeviceState;

/// Operator requests, resolved from a single button press and the current state.
///
/// Every event names exactly one goal state. The same physical button maps to
/// different events depending on where the device is (see [`super::resolve`]).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TransitionEvent {
    RequestStart,
    RequestPause,
    RequestResume,
    RequestStop,
    RequestSleep,
    RequestRestart,
}

impl TransitionEvent {
    /// State entered when this event is applied.
    pub const fn goal(self) -> DeviceState {
        match self {
            TransitionEvent::RequestStart => DeviceState::Starting,
            TransitionEvent::RequestPause => DeviceState::Paused,
            TransitionEvent::RequestResume => DeviceState::Continuing,
            TransitionEvent::RequestStop => DeviceState::Stopped,
            TransitionEvent::RequestSleep => DeviceState::Sleeping,
            TransitionEvent::RequestRestart => DeviceState::Restarting,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            TransitionEvent::RequestStart => "start",
            TransitionEvent::RequestPause => "pause",
            TransitionEvent::RequestResume => "resume",
            TransitionEvent::RequestStop => "stop",
            TransitionEvent::RequestSleep => "sleep",
            TransitionEvent::RequestRestart => "restart",
        }
    }
}
