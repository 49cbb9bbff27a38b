//! Table-driven finite state machines
//!
//! States and events are plain integer identifiers so machines can be
//! declared as constant tables and wrapped by typed enums at the call site.
//!
//! ```rust
//! use easenote_core::fsm::StateMachine;
//!
//! let mut fsm = StateMachine::builder(0).on(0, 7, 1).build();
//! assert!(!fsm.send(3)); // no transition for event 3 in state 0
//! assert!(fsm.send(7));
//! assert_eq!(fsm.current_state(), 1);
//! ```

use smallvec::SmallVec;

/// State identifier
pub type StateId = u32;

/// Event identifier
pub type EventId = u32;

/// A single `from --event--> to` edge
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: StateId,
    pub event: EventId,
    pub to: StateId,
}

impl Transition {
    pub const fn new(from: StateId, event: EventId, to: StateId) -> Self {
        Self { from, event, to }
    }
}

/// A flat state machine
///
/// Events without a matching transition for the current state are ignored.
#[derive(Clone, Debug)]
pub struct StateMachine {
    current: StateId,
    transitions: SmallVec<[Transition; 8]>,
}

impl StateMachine {
    /// Start building a machine that begins in `initial`
    pub fn builder(initial: StateId) -> StateMachineBuilder {
        StateMachineBuilder {
            initial,
            transitions: SmallVec::new(),
        }
    }

    /// The state the machine is in right now
    pub fn current_state(&self) -> StateId {
        self.current
    }

    /// Deliver an event
    ///
    /// Returns `true` if a transition fired. A transition back into the same
    /// state still counts as fired.
    pub fn send(&mut self, event: EventId) -> bool {
        match self.lookup(event) {
            Some(next) => {
                tracing::trace!(from = self.current, event, to = next, "fsm transition");
                self.current = next;
                true
            }
            None => false,
        }
    }

    fn lookup(&self, event: EventId) -> Option<StateId> {
        self.transitions
            .iter()
            .find(|t| t.from == self.current && t.event == event)
            .map(|t| t.to)
    }
}

/// Builder for [`StateMachine`]
pub struct StateMachineBuilder {
    initial: StateId,
    transitions: SmallVec<[Transition; 8]>,
}

impl StateMachineBuilder {
    /// Add a transition `from --event--> to`
    ///
    /// The first matching edge wins if the same `(from, event)` pair is
    /// declared more than once.
    pub fn on(mut self, from: StateId, event: EventId, to: StateId) -> Self {
        self.transitions.push(Transition::new(from, event, to));
        self
    }

    pub fn build(self) -> StateMachine {
        StateMachine {
            current: self.initial,
            transitions: self.transitions,
        }
    }
}
