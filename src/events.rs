//! Notifications emitted by a rotation controller.
//!
//! Each controller owns its own [`EventQueue`]; consumers poll it after
//! updating, so nothing leaks between rooms.

use std::collections::VecDeque;

use crate::orientation::Face;

/// A one-shot notification about a rotation lifecycle transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationEvent {
    /// The first frame of motion after being settled.
    Started,
    /// Motion ended with a discrete step and the finish debounce elapsed.
    Finished {
        floor: Face,
        /// Whether `floor` differs from the floor when `Started` fired.
        floor_changed: bool,
    },
    /// Motion ended with a snap and the finish debounce elapsed.
    Snapped { floor: Face },
    InspectEntered,
    InspectExited { floor: Face },
}

impl RotationEvent {
    /// The floor face this event asks the room to show, if any.
    pub fn floor_update(&self) -> Option<Face> {
        match *self {
            RotationEvent::Snapped { floor } => Some(floor),
            RotationEvent::Finished {
                floor,
                floor_changed: true,
            } => Some(floor),
            _ => None,
        }
    }
}

/// FIFO of pending events.
#[derive(Debug, Default, Clone)]
pub struct EventQueue {
    pending: VecDeque<RotationEvent>,
}

impl EventQueue {
    pub fn push(&mut self, event: RotationEvent) {
        log::debug!("event: {event:?}");
        self.pending.push_back(event);
    }

    /// Removes and returns every pending event, oldest first.
    pub fn drain(&mut self) -> impl Iterator<Item = RotationEvent> + '_ {
        self.pending.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
