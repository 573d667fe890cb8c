use crate::input::Button;

use super::{DeviceState, TransitionEvent};

/// Resolve a single debounced button press into a transition event.
///
/// Rules:
/// - Stop: Stopped/Starting/Finished go to sleep, Sleeping ignores it, anything else stops.
/// - Resume: Paused/Starting/Finished resume monitoring, anything else pauses.
/// - Start: Starting begins monitoring, Finished/Stopped restart, anything else re-arms.
///
/// Returns `None` only for a press that has no effect (Stop while Sleeping).
pub fn resolve(current: DeviceState, button: Button) -> Option<TransitionEvent> {
    use DeviceState::*;
    use TransitionEvent::*;

    let event = match (button, current) {
        (Button::Stop, Stopped | Starting | Finished) => RequestSleep,
        (Button::Stop, Sleeping) => return None,
        (Button::Stop, _) => RequestStop,

        (Button::Resume, Paused | Starting | Finished) => RequestResume,
        (Button::Resume, _) => RequestPause,

        (Button::Start, Starting) => RequestResume,
        (Button::Start, Finished | Stopped) => RequestRestart,
        (Button::Start, _) => RequestStart,
    };

    Some(event)
}

/// State the device ends up in after `button` is pressed in `current`.
///
/// A no-op press leaves the state unchanged.
pub fn goal_state_for_button(current: DeviceState, button: Button) -> DeviceState {
    resolve(current, button).map_or(current, TransitionEvent::goal)
}

/// Events an operator can trigger from a given state, in Stop/Resume/Start button order.
pub fn available_events(state: DeviceState) -> &'static [TransitionEvent] {
    use DeviceState::*;
    use TransitionEvent::*;

    match state {
        Starting => &[RequestSleep, RequestResume],
        Finished => &[RequestSleep, RequestResume, RequestRestart],
        Stopped => &[RequestSleep, RequestPause, RequestRestart],
        Paused => &[RequestStop, RequestResume, RequestStart],
        Sleeping => &[RequestPause, RequestStart],
        Continuing | Restarting | Error => &[RequestStop, RequestPause, RequestStart],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ALL_BUTTONS;
    use crate::lifecycle::ALL_STATES;

    #[test]
    fn stop_while_sleeping_is_ignored() {
        assert_eq!(resolve(DeviceState::Sleeping, Button::Stop), None);
        assert_eq!(
            goal_state_for_button(DeviceState::Sleeping, Button::Stop),
            DeviceState::Sleeping
        );
    }

    #[test]
    fn stop_goes_to_sleep_from_idle_states() {
        for state in [DeviceState::Stopped, DeviceState::Starting, DeviceState::Finished] {
            assert_eq!(
                goal_state_for_button(state, Button::Stop),
                DeviceState::Sleeping
            );
        }
        for state in [
            DeviceState::Continuing,
            DeviceState::Paused,
            DeviceState::Restarting,
            DeviceState::Error,
        ] {
            assert_eq!(goal_state_for_button(state, Button::Stop), DeviceState::Stopped);
        }
    }

    #[test]
    fn resume_toggles_between_paused_and_continuing() {
        assert_eq!(
            goal_state_for_button(DeviceState::Continuing, Button::Resume),
            DeviceState::Paused
        );
        assert_eq!(
            goal_state_for_button(DeviceState::Paused, Button::Resume),
            DeviceState::Continuing
        );
        assert_eq!(
            goal_state_for_button(DeviceState::Sleeping, Button::Resume),
            DeviceState::Paused
        );
    }

    #[test]
    fn start_depends_on_where_the_cycle_is() {
        assert_eq!(
            goal_state_for_button(DeviceState::Starting, Button::Start),
            DeviceState::Continuing
        );
        assert_eq!(
            goal_state_for_button(DeviceState::Finished, Button::Start),
            DeviceState::Restarting
        );
        assert_eq!(
            goal_state_for_button(DeviceState::Stopped, Button::Start),
            DeviceState::Restarting
        );
        assert_eq!(
            goal_state_for_button(DeviceState::Error, Button::Start),
            DeviceState::Starting
        );
    }

    #[test]
    fn available_events_match_resolution() {
        for state in ALL_STATES {
            let resolved: Vec<_> = ALL_BUTTONS
                .into_iter()
                .filter_map(|button| resolve(state, button))
                .collect();
            let mut deduped = resolved.clone();
            deduped.dedup();
            assert_eq!(available_events(state), deduped.as_slice(), "state {state:?}");
        }
    }
}
