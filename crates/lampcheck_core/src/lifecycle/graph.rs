use crate::input::{Button, ALL_BUTTONS};

use super::{resolve, DeviceState, TransitionEvent, ALL_STATES};

/// Full (state, button) table derived from [`resolve`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TransitionTable {
    pub states: Vec<DeviceState>,
    pub edges: Vec<TransitionEdge>,
}

/// One row of the table. `event` is `None` for a press that has no effect,
/// in which case `goal == start`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TransitionEdge {
    pub start: DeviceState,
    pub button: Button,
    pub event: Option<TransitionEvent>,
    pub goal: DeviceState,
}

impl TransitionTable {
    pub fn edge(&self, start: DeviceState, button: Button) -> Option<&TransitionEdge> {
        self.edges
            .iter()
            .find(|edge| edge.start == start && edge.button == button)
    }
}

/// Build the canonical button transition table: one edge per (state, button).
pub fn transition_table() -> TransitionTable {
    let mut edges = Vec::with_capacity(ALL_STATES.len() * ALL_BUTTONS.len());

    for start in ALL_STATES {
        for button in ALL_BUTTONS {
            let event = resolve(start, button);
            edges.push(TransitionEdge {
                start,
                button,
                event,
                goal: event.map_or(start, TransitionEvent::goal),
            });
        }
    }

    TransitionTable {
        states: ALL_STATES.to_vec(),
        edges,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_total() {
        let table = transition_table();

        assert_eq!(table.states.len(), ALL_STATES.len());
        assert_eq!(table.edges.len(), ALL_STATES.len() * ALL_BUTTONS.len());

        for state in ALL_STATES {
            for button in ALL_BUTTONS {
                assert!(
                    table.edge(state, button).is_some(),
                    "missing edge {state:?} + {button:?}"
                );
            }
        }
    }

    #[test]
    fn the_only_no_op_is_stop_while_sleeping() {
        let table = transition_table();
        let no_ops: Vec<_> = table.edges.iter().filter(|e| e.event.is_none()).collect();

        assert_eq!(no_ops.len(), 1);
        assert_eq!(no_ops[0].start, DeviceState::Sleeping);
        assert_eq!(no_ops[0].button, Button::Stop);
        assert_eq!(no_ops[0].goal, DeviceState::Sleeping);
    }

    #[test]
    fn no_button_leads_into_error_or_finished() {
        let table = transition_table();
        for edge in &table.edges {
            if edge.event.is_some() {
                assert_ne!(edge.goal, DeviceState::Error, "{edge:?}");
                assert_ne!(edge.goal, DeviceState::Finished, "{edge:?}");
            }
        }
    }
}
