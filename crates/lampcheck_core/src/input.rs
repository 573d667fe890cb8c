use std::time::Duration;

use crate::board::{elapsed, Millis};

/// The three operator buttons.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Button {
    /// Start & Restart.
    Start,
    /// Resume & Pause.
    Resume,
    Stop,
}

impl Button {
    pub const fn label(self) -> &'static str {
        match self {
            Button::Start => "start",
            Button::Resume => "resume",
            Button::Stop => "stop",
        }
    }
}

/// Canonical button order, highest priority first.
pub const ALL_BUTTONS: [Button; 3] = [Button::Stop, Button::Resume, Button::Start];

/// Raw active-high levels of the three buttons at one instant.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct ButtonSample {
    pub start: bool,
    pub resume: bool,
    pub stop: bool,
}

impl ButtonSample {
    pub const fn only(button: Button) -> Self {
        Self {
            start: matches!(button, Button::Start),
            resume: matches!(button, Button::Resume),
            stop: matches!(button, Button::Stop),
        }
    }

    /// The pressed button, if exactly one is down. Chords are ignored.
    pub fn pressed(&self) -> Option<Button> {
        match (self.start, self.resume, self.stop) {
            (true, false, false) => Some(Button::Start),
            (false, true, false) => Some(Button::Resume),
            (false, false, true) => Some(Button::Stop),
            _ => None,
        }
    }

    pub fn set(&mut self, button: Button) {
        match button {
            Button::Start => self.start = true,
            Button::Resume => self.resume = true,
            Button::Stop => self.stop = true,
        }
    }
}

/// Minimum spacing between accepted button events.
#[derive(Debug, Clone)]
pub struct Debouncer {
    spacing: Duration,
    last_accepted: Option<Millis>,
}

impl Debouncer {
    pub const fn new(spacing: Duration) -> Self {
        Self {
            spacing,
            last_accepted: None,
        }
    }

    /// Accept an event at `now` if more than `spacing` has passed since the
    /// previous accepted one. The first event is always accepted.
    pub fn accept(&mut self, now: Millis) -> bool {
        let due = match self.last_accepted {
            Some(last) => elapsed(now, last) > self.spacing,
            None => true,
        };
        if due {
            self.last_accepted = Some(now);
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_press_is_recognised() {
        for button in ALL_BUTTONS {
            assert_eq!(ButtonSample::only(button).pressed(), Some(button));
        }
    }

    #[test]
    fn chords_and_silence_are_ignored() {
        assert_eq!(ButtonSample::default().pressed(), None);
        let two = ButtonSample {
            start: true,
            resume: true,
            stop: false,
        };
        assert_eq!(two.pressed(), None);
        let three = ButtonSample {
            start: true,
            resume: true,
            stop: true,
        };
        assert_eq!(three.pressed(), None);
    }

    #[test]
    fn debounce_spacing_is_strict() {
        let mut debounce = Debouncer::new(Duration::from_millis(250));
        assert!(debounce.accept(1_000));
        assert!(!debounce.accept(1_100));
        assert!(!debounce.accept(1_250));
        assert!(debounce.accept(1_251));
        assert!(!debounce.accept(1_400));
    }
}
