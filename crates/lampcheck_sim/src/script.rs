use std::str::FromStr;

use lampcheck_core::board::Millis;
use lampcheck_core::error::{CoreError, Domain, ErrorKind, Payload, Result};
use lampcheck_core::input::Button;

/// Button name as typed by an operator or written in a script.
pub fn parse_button(name: &str) -> Option<Button> {
    match name.trim().to_ascii_lowercase().as_str() {
        "start" | "restart" => Some(Button::Start),
        "resume" | "pause" | "play" => Some(Button::Resume),
        "stop" | "sleep" => Some(Button::Stop),
        _ => None,
    }
}

/// One line of operator input.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Command {
    Press(Button),
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "quit" | "exit" | "q" => Some(Command::Quit),
            other => parse_button(other).map(Command::Press),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ScheduledPress {
    pub button: Button,
    pub at: Millis,
}

/// Button presses at fixed offsets from simulator start, e.g.
/// `start@500,pause@3000,pause@4000,stop@20000`.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct PressScript {
    pending: Vec<ScheduledPress>,
}

impl PressScript {
    pub fn new(mut presses: Vec<ScheduledPress>) -> Self {
        // Stored latest-first so `due` can pop from the back.
        presses.sort_by(|a, b| b.at.cmp(&a.at));
        Self { pending: presses }
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Next press whose time has come, earliest first.
    pub fn due(&mut self, now: Millis) -> Option<Button> {
        match self.pending.last() {
            Some(next) if next.at <= now => self.pending.pop().map(|p| p.button),
            _ => None,
        }
    }
}

fn bad_entry(entry: &str) -> CoreError {
    CoreError::warn()
        .domain(Domain::Config)
        .kind(ErrorKind::InvalidArgument)
        .msg("script entries look like `start@500`")
        .payload(Payload::Context {
            key: "entry",
            value: entry.to_string().into(),
        })
        .build()
}

impl FromStr for PressScript {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        let mut presses = Vec::new();
        for entry in s.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (name, at) = entry.split_once('@').ok_or_else(|| bad_entry(entry))?;
            let button = parse_button(name).ok_or_else(|| bad_entry(entry))?;
            let at = at.trim().parse::<Millis>().map_err(|_| bad_entry(entry))?;
            presses.push(ScheduledPress { button, at });
        }
        Ok(Self::new(presses))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_parses_and_plays_in_time_order() {
        let mut script: PressScript = "stop@900, start@100,pause@400".parse().unwrap();
        assert_eq!(script.len(), 3);

        assert_eq!(script.due(50), None);
        assert_eq!(script.due(100), Some(Button::Start));
        assert_eq!(script.due(100), None);
        assert_eq!(script.due(1_000), Some(Button::Resume));
        assert_eq!(script.due(1_000), Some(Button::Stop));
        assert!(script.is_empty());
    }

    #[test]
    fn malformed_entries_are_rejected() {
        for bad in ["start", "jump@10", "stop@soon"] {
            let err = bad.parse::<PressScript>().unwrap_err();
            assert_eq!(err.kind, ErrorKind::InvalidArgument, "{bad}");
        }
        assert!("".parse::<PressScript>().unwrap().is_empty());
    }

    #[test]
    fn commands_accept_aliases() {
        assert_eq!(Command::parse(" Play "), Some(Command::Press(Button::Resume)));
        assert_eq!(Command::parse("restart"), Some(Command::Press(Button::Start)));
        assert_eq!(Command::parse("q"), Some(Command::Quit));
        assert_eq!(Command::parse("dance"), None);
    }
}
