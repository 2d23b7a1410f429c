//! Inside/inspect view modes and the transition wrapper used to switch them.

use std::fmt;

/// How the player is looking at the room.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ViewMode {
    /// Walking inside the room; rotation happens in discrete steps.
    #[default]
    Inside,
    /// Holding the room up to look at it; rotation is free and snaps on release.
    Inspect,
}

impl ViewMode {
    pub const fn toggled(self) -> ViewMode {
        match self {
            ViewMode::Inside => ViewMode::Inspect,
            ViewMode::Inspect => ViewMode::Inside,
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewMode::Inside => f.write_str("inside"),
            ViewMode::Inspect => f.write_str("inspect"),
        }
    }
}

/// Wraps a state-changing action, e.g. between a fade out and a fade in.
///
/// Implementations must call `action` exactly once.
pub trait Transition {
    fn run(&mut self, action: &mut dyn FnMut());
}

/// Runs the action with no visual transition.
#[derive(Debug, Default, Clone, Copy)]
pub struct Immediate;

impl Transition for Immediate {
    fn run(&mut self, action: &mut dyn FnMut()) {
        action();
    }
}
